//! Server-rendered pages for the purchase list.
//!
//! Templates are compiled into the binary and loaded once into a `Tera`
//! shared through `web::Data`. Every template name ends in `.html`, so tera
//! autoescapes all interpolated values.

use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::error::DomainError;
use crate::domain::product::Product;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("fields.html", include_str!("../../templates/fields.html")),
    ("purchases.html", include_str!("../../templates/purchases.html")),
    ("product.html", include_str!("../../templates/product.html")),
    ("edit.html", include_str!("../../templates/edit.html")),
];

pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}

#[derive(Serialize)]
struct ProductView<'a> {
    id: i64,
    name: &'a str,
    amount: i64,
    brand: &'a str,
    validity: &'a str,
    created: String,
}

impl<'a> From<&'a Product> for ProductView<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            id: p.id,
            name: &p.name,
            amount: p.amount,
            brand: &p.brand,
            validity: &p.validity,
            created: p.creation_date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Values prefilled into the product form; blank on the list page.
#[derive(Serialize, Default)]
struct FormValues<'a> {
    name: &'a str,
    amount: String,
    brand: &'a str,
    validity: &'a str,
}

impl<'a> From<&'a Product> for FormValues<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            name: &p.name,
            amount: p.amount.to_string(),
            brand: &p.brand,
            validity: &p.validity,
        }
    }
}

fn render(tera: &Tera, template: &str, context: &Context) -> Result<String, DomainError> {
    tera.render(template, context)
        .map_err(|e| DomainError::Internal(format!("rendering {template}: {e}")))
}

pub fn render_list(tera: &Tera, products: &[Product]) -> Result<String, DomainError> {
    let rows: Vec<ProductView> = products.iter().map(ProductView::from).collect();
    let mut context = Context::new();
    context.insert("title", "Purchase list");
    context.insert("products", &rows);
    context.insert("form", &FormValues::default());
    render(tera, "purchases.html", &context)
}

pub fn render_detail(tera: &Tera, product: &Product) -> Result<String, DomainError> {
    let mut context = Context::new();
    context.insert("title", &product.name);
    context.insert("product", &ProductView::from(product));
    render(tera, "product.html", &context)
}

pub fn render_edit(tera: &Tera, product: &Product) -> Result<String, DomainError> {
    let mut context = Context::new();
    context.insert("title", &format!("Edit {}", product.name));
    context.insert("product", &ProductView::from(product));
    context.insert("form", &FormValues::from(product));
    render(tera, "edit.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str) -> Product {
        Product {
            id: 3,
            name: name.to_string(),
            amount: 2,
            brand: "Acme".to_string(),
            validity: "Indeterminate".to_string(),
            creation_date: Utc::now(),
        }
    }

    #[test]
    fn list_links_every_product() {
        let tera = templates().unwrap();
        let html = render_list(&tera, &[product("Milk")]).unwrap();
        assert!(html.contains(r#"href="/purchases/product/3""#));
        assert!(html.contains(r#"href="/purchases/delete/3""#));
        assert!(html.contains(r#"action="/purchases""#));
        assert!(!html.contains("Nothing on the list yet."));
    }

    #[test]
    fn empty_list_still_offers_the_form() {
        let tera = templates().unwrap();
        let html = render_list(&tera, &[]).unwrap();
        assert!(html.contains("Nothing on the list yet."));
        assert!(html.contains(r#"name="amount""#));
        assert!(html.contains(r#"value="""#));
    }

    #[test]
    fn edit_form_is_prefilled_and_escaped() {
        let tera = templates().unwrap();
        let html = render_edit(&tera, &product("<script>")).unwrap();
        assert!(html.contains(r#"action="/purchases/edit/3""#));
        assert!(html.contains(r#"value="&lt;script&gt;""#));
        assert!(html.contains(r#"value="2""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn detail_escapes_user_text() {
        let tera = templates().unwrap();
        let html = render_detail(&tera, &product(r#"Tom & "Jerry""#)).unwrap();
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(html.contains("<dt>Validity</dt><dd>Indeterminate</dd>"));
    }
}
