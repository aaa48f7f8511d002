//! Product card shown in listings.

use askama::Template;
use askama_web::WebTemplate;
use hygraph_storefront_core::{CurrencyCode, Image, Product, format_currency_value};
use serde::Serialize;

/// Card view model for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub href: String,
    pub primary_image: Option<Image>,
    pub price: String,
}

impl ProductCard {
    /// Build a card, formatting the price in `currency`.
    #[must_use]
    pub fn new(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            href: format!("/products/{}", product.slug),
            primary_image: product.primary_image().cloned(),
            price: format_currency_value(currency, product.price),
        }
    }
}

/// Product card fragment template.
#[derive(Template, WebTemplate)]
#[template(
    ext = "html",
    source = r#"<article id="product-{{ card.id }}">
  <a href="{{ card.href }}">
    {%- if let Some(image) = card.primary_image %}
    <img src="{{ image.url }}" alt="{{ card.name }}" title="{{ card.name }}"
      {%- if let Some(height) = image.height %} height="{{ height }}"{% endif -%}
      {%- if let Some(width) = image.width %} width="{{ width }}"{% endif %}>
    {%- endif %}
    <h3>{{ card.name }}</h3>
    <p>{{ card.price }}</p>
  </a>
</article>"#
)]
pub struct ProductCardTemplate {
    pub card: ProductCard,
}
