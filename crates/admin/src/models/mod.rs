//! Domain models for the admin panel.

pub mod admin_user;
pub mod product_draft;

pub use admin_user::CurrentAdmin;
pub use product_draft::{
    FieldEdit, ImageSelection, ImageUpload, ProductDraft, ProductEditor, SubmitBlocked,
    UpdatePayload, ValidationError,
};
