//! Category listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use threadline_core::{Category, SortOrder, Wishlist};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::PageContext;
use crate::routes::pages::not_found_page;
use crate::state::AppState;
use crate::stores;
use crate::views::ProductCardView;

/// Category page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub sort: Option<String>,
}

/// A `<select>` option for the sort control.
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

const SORT_OPTIONS: [(SortOrder, &str); 3] = [
    (SortOrder::Default, "Featured"),
    (SortOrder::PriceAsc, "Price: Low to High"),
    (SortOrder::PriceDesc, "Price: High to Low"),
];

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/category.html")]
pub struct CategoryTemplate {
    pub page: PageContext,
    pub name: &'static str,
    pub slug: &'static str,
    pub products: Vec<ProductCardView>,
    pub sort_options: Vec<SortOptionView>,
}

/// Display the products of one category.
///
/// The category segment is matched case-insensitively; an unknown category
/// renders the not-found page. Unknown `sort` values fall back to catalog
/// order.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryQuery>,
    session: Session,
    page: PageContext,
) -> Result<Response> {
    let Ok(category) = category.parse::<Category>() else {
        return Ok(not_found_page(
            page,
            "Category Not Found",
            "Sorry, we don't carry that category.",
        ));
    };

    let sort = query
        .sort
        .as_deref()
        .map_or(SortOrder::Default, SortOrder::parse);
    let mut products = state.catalog().by_category(category.slug());
    sort.apply(&mut products);

    let wishlist: Wishlist = stores::load(&session).await?;

    Ok(CategoryTemplate {
        page,
        name: category.name(),
        slug: category.slug(),
        products: ProductCardView::list(products, &wishlist),
        sort_options: SORT_OPTIONS
            .into_iter()
            .map(|(order, label)| SortOptionView {
                value: order.as_str(),
                label,
                selected: order == sort,
            })
            .collect(),
    }
    .into_response())
}
