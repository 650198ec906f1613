//! Product routes: listing, edit form, and update submission.
//!
//! The edit page is one load / one submit: `edit` fetches the record and
//! renders the form pre-populated from it, `update` folds the browser's
//! multipart POST into a fresh draft, validates, and forwards it to the
//! catalog API as a multipart PUT. Draft state is request-scoped, so a slow
//! load can never clobber edits from a later request, and a dropped
//! connection simply drops the handler future.

use askama::Template;
use axum::{
    Router,
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use oakmere_core::{ProductId, ProductRecord};

use crate::{
    error::AppError,
    filters,
    middleware::auth::RequireAdminAuth,
    models::{
        CurrentAdmin, FieldEdit, ImageSelection, ImageUpload, ProductDraft, ProductEditor,
        SubmitBlocked,
    },
    state::AppState,
};

use super::AdminUserView;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index))
        .route("/products/{id}/edit", get(edit))
        .route("/products/{id}", post(update))
}

// =============================================================================
// Views
// =============================================================================

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// Set by the redirect after a successful update.
    pub updated: Option<String>,
}

/// Product view for the listing template.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub is_new: bool,
}

/// Format a string-encoded price for display.
fn format_price(raw: &str) -> String {
    raw.parse::<f64>()
        .map_or_else(|_| format!("${raw}"), |amount| format!("${amount:.2}"))
}

impl From<&ProductRecord> for ProductView {
    fn from(record: &ProductRecord) -> Self {
        Self {
            id: record
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            name: record.name.clone().unwrap_or_else(|| "(unnamed)".to_owned()),
            category: record.category.clone().unwrap_or_default(),
            price: record
                .price
                .as_deref()
                .map_or_else(|| "$0.00".to_owned(), format_price),
            stock: record.stock.clone().unwrap_or_else(|| "0".to_owned()),
            is_new: record.is_new.unwrap_or(false),
        }
    }
}

/// Form field values for the edit template.
#[derive(Debug, Clone)]
pub struct ProductFormView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub discount: String,
    pub is_new: bool,
    /// File name of the replacement image selected in this session, if any.
    pub image_name: Option<String>,
    pub hover_image_name: Option<String>,
}

impl From<&ProductDraft> for ProductFormView {
    fn from(draft: &ProductDraft) -> Self {
        let file_name = |selection: &ImageSelection| match selection {
            ImageSelection::Replaced(upload) => Some(upload.file_name.clone()),
            ImageSelection::Unchanged => None,
        };

        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price.clone(),
            stock: draft.stock.clone(),
            category: draft.category.clone(),
            discount: draft.discount.clone(),
            is_new: draft.is_new,
            image_name: file_name(&draft.image),
            hover_image_name: file_name(&draft.hover_image),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub products: Vec<ProductView>,
    pub updated: bool,
    pub load_error: Option<String>,
}

/// Edit product page template.
#[derive(Template)]
#[template(path = "products/edit.html")]
pub struct EditProductTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub product_id: String,
    pub form: ProductFormView,
    pub error_message: Option<String>,
}

fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Template render error: {e}")))
}

fn edit_page(
    admin: &CurrentAdmin,
    id: &ProductId,
    draft: &ProductDraft,
    error_message: Option<String>,
) -> Result<Html<String>, AppError> {
    let template = EditProductTemplate {
        admin_user: AdminUserView::from(admin),
        current_path: "/products".to_owned(),
        product_id: id.to_string(),
        form: ProductFormView::from(draft),
        error_message,
    };
    render(&template)
}

// =============================================================================
// Handlers
// =============================================================================

/// Products list page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let (products, load_error) = match state.catalog().products().await {
        Ok(records) => (records.iter().map(ProductView::from).collect(), None),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (vec![], Some("Error loading products".to_owned()))
        }
    };

    let template = ProductsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/products".to_owned(),
        products,
        updated: query.updated.is_some(),
        load_error,
    };

    render(&template)
}

/// Edit form page handler: one read per render, record wins wholesale.
#[instrument(skip(admin, state))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>, AppError> {
    let (draft, error_message) = match state.catalog().product(&id).await {
        Ok(record) => (ProductDraft::from_record(&record), None),
        Err(e) => {
            tracing::error!(product_id = %id, "Error fetching product: {e}");
            // Leave the form in its empty state; the admin sees the banner.
            (
                ProductDraft::default(),
                Some("Error loading product data".to_owned()),
            )
        }
    };

    edit_page(&admin, &id, &draft, error_message)
}

/// Update submission handler.
///
/// Validation failures and catalog rejections re-render the form with the
/// submitted draft intact so the admin can correct and retry; only a
/// successful update navigates back to the listing.
#[instrument(skip(admin, state, multipart))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let draft = draft_from_form(multipart).await?;
    let mut editor = ProductEditor::new(draft);

    let payload = match editor.begin_submit() {
        Ok(payload) => payload,
        Err(SubmitBlocked::Invalid(e)) => {
            tracing::warn!(product_id = %id, "Update blocked: {e}");
            let message = format!("Please fill all required fields ({}).", e.missing.join(", "));
            return Ok(edit_page(&admin, &id, editor.draft(), Some(message))?.into_response());
        }
        Err(SubmitBlocked::AlreadyInFlight) => {
            return Err(AppError::BadRequest(
                "An update is already in progress".to_owned(),
            ));
        }
    };

    let result = state.catalog().update_product(&id, payload).await;
    editor.finish_submit();

    match result {
        Ok(()) => Ok(Redirect::to("/products?updated=1").into_response()),
        Err(e) => {
            tracing::error!(product_id = %id, "Error updating product: {e}");
            let message = e.update_message();
            Ok(edit_page(&admin, &id, editor.draft(), Some(message))?.into_response())
        }
    }
}

// =============================================================================
// Form Decoding
// =============================================================================

/// Fold the browser's multipart body into a draft, one field edit at a time.
async fn draft_from_form(mut multipart: Multipart) -> Result<ProductDraft, AppError> {
    let mut draft = ProductDraft::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        let edit = match name.as_str() {
            "image" | "hoverImage" => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_owned(), str::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

                // A file input with nothing picked still posts an empty
                // part; treat that as "no selection", not an empty file.
                let upload = file_name
                    .filter(|f| !f.is_empty())
                    .filter(|_| !data.is_empty())
                    .map(|file_name| ImageUpload {
                        file_name,
                        content_type,
                        data,
                    });

                if name == "image" {
                    FieldEdit::Image(upload)
                } else {
                    FieldEdit::HoverImage(upload)
                }
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed form field: {e}")))?;

                match other {
                    "name" => FieldEdit::Name(value),
                    "description" => FieldEdit::Description(value),
                    "price" => FieldEdit::Price(value),
                    "stock" => FieldEdit::Stock(value),
                    "category" => FieldEdit::Category(value),
                    "discount" => FieldEdit::Discount(value),
                    "isNew" => FieldEdit::IsNew(matches!(value.as_str(), "on" | "true" | "1")),
                    unknown => {
                        tracing::debug!(field = %unknown, "Ignoring unknown form field");
                        continue;
                    }
                }
            }
        };

        draft = draft.apply(edit);
    }

    Ok(draft)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("20"), "$20.00");
        assert_eq!(format_price("19.5"), "$19.50");
        assert_eq!(format_price("n/a"), "$n/a");
    }

    #[test]
    fn test_product_view_defaults() {
        let record: ProductRecord = serde_json::from_str("{}").unwrap();
        let view = ProductView::from(&record);
        assert_eq!(view.name, "(unnamed)");
        assert_eq!(view.price, "$0.00");
        assert_eq!(view.stock, "0");
        assert!(!view.is_new);
    }

    #[test]
    fn test_form_view_shows_selected_file_names() {
        let draft = ProductDraft::default().apply(FieldEdit::Image(Some(ImageUpload {
            file_name: "chair.png".to_owned(),
            content_type: "image/png".to_owned(),
            data: bytes::Bytes::from_static(b"png"),
        })));

        let view = ProductFormView::from(&draft);
        assert_eq!(view.image_name.as_deref(), Some("chair.png"));
        assert_eq!(view.hover_image_name, None);
    }
}
