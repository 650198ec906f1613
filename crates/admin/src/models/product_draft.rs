//! Editable product draft backing the edit-product page.
//!
//! The draft is the in-memory copy of one catalog record while it is being
//! edited. It is an immutable value: loading a record and applying a field
//! edit both produce a *new* draft rather than mutating in place, which keeps
//! the form logic trivially testable and rules out aliasing surprises.
//!
//! Image fields never mirror the server's stored images. They track only
//! whether the admin picked a replacement file in this session, as an
//! explicit [`ImageSelection`] instead of a null sentinel.

use bytes::Bytes;
use thiserror::Error;

use oakmere_core::ProductRecord;

/// A replacement image file picked by the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name from the picker.
    pub file_name: String,
    /// MIME type reported by the browser.
    pub content_type: String,
    /// Raw file contents.
    pub data: Bytes,
}

/// State of one image slot in the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageSelection {
    /// Keep whatever the catalog currently stores.
    #[default]
    Unchanged,
    /// Replace the stored image with this upload.
    Replaced(ImageUpload),
}

impl ImageSelection {
    /// Whether a replacement file was selected in this session.
    #[must_use]
    pub const fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced(_))
    }
}

/// The in-memory draft of one product record.
///
/// Numeric fields stay string-encoded exactly as entered; nothing is parsed
/// client-side. The catalog API receives them as form-field strings either
/// way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub discount: String,
    pub is_new: bool,
    pub image: ImageSelection,
    pub hover_image: ImageSelection,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            stock: String::new(),
            category: String::new(),
            discount: "0".to_owned(),
            is_new: false,
            image: ImageSelection::Unchanged,
            hover_image: ImageSelection::Unchanged,
        }
    }
}

/// One field edit event from the form.
///
/// Each variant replaces exactly one draft field; all other fields are
/// carried over untouched. `Image`/`HoverImage` carry `None` when the file
/// picker yielded no file, in which case the previous selection is kept.
#[derive(Debug, Clone)]
pub enum FieldEdit {
    Name(String),
    Description(String),
    Price(String),
    Stock(String),
    Category(String),
    Discount(String),
    IsNew(bool),
    /// Dedicated toggle control, independent of the generic handler.
    ToggleIsNew,
    Image(Option<ImageUpload>),
    HoverImage(Option<ImageUpload>),
}

/// Required fields that were empty at submission time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing required fields: {}", missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Outbound multipart payload built from a validated draft.
///
/// `fields` always carries all seven non-file fields (including `discount`
/// and `isNew`, which have no empty state); `files` carries only the image
/// slots actually replaced in this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePayload {
    pub fields: Vec<(&'static str, String)>,
    pub files: Vec<(&'static str, ImageUpload)>,
}

impl ProductDraft {
    /// Build a draft from a fetched catalog record.
    ///
    /// Every non-file field is set from the record, falling back to its
    /// empty default when the source field is absent. The image slots are
    /// always `Unchanged`: this form tracks new selections only, never the
    /// server's stored images.
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            price: record.price.clone().unwrap_or_default(),
            stock: record.stock.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
            discount: record.discount.clone().unwrap_or_else(|| "0".to_owned()),
            is_new: record.is_new.unwrap_or(false),
            image: ImageSelection::Unchanged,
            hover_image: ImageSelection::Unchanged,
        }
    }

    /// Apply one field edit, producing the next draft value.
    #[must_use]
    pub fn apply(self, edit: FieldEdit) -> Self {
        match edit {
            FieldEdit::Name(name) => Self { name, ..self },
            FieldEdit::Description(description) => Self { description, ..self },
            FieldEdit::Price(price) => Self { price, ..self },
            FieldEdit::Stock(stock) => Self { stock, ..self },
            FieldEdit::Category(category) => Self { category, ..self },
            FieldEdit::Discount(discount) => Self { discount, ..self },
            FieldEdit::IsNew(is_new) => Self { is_new, ..self },
            FieldEdit::ToggleIsNew => Self {
                is_new: !self.is_new,
                ..self
            },
            FieldEdit::Image(Some(upload)) => Self {
                image: ImageSelection::Replaced(upload),
                ..self
            },
            FieldEdit::HoverImage(Some(upload)) => Self {
                hover_image: ImageSelection::Replaced(upload),
                ..self
            },
            // Empty file picker: leave the previous selection alone.
            FieldEdit::Image(None) | FieldEdit::HoverImage(None) => self,
        }
    }

    /// Check the required-field gate: `name`, `price`, `stock`, `category`.
    ///
    /// Whitespace-only values count as empty. That is deliberately stricter
    /// than only rejecting `""`; a blank-looking name or category is never
    /// worth sending to the catalog.
    ///
    /// # Errors
    ///
    /// Returns the list of empty required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.price.trim().is_empty() {
            missing.push("price");
        }
        if self.stock.trim().is_empty() {
            missing.push("stock");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Build the outbound multipart payload from the current draft.
    #[must_use]
    pub fn to_payload(&self) -> UpdatePayload {
        let fields = vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("price", self.price.clone()),
            ("stock", self.stock.clone()),
            ("category", self.category.clone()),
            ("discount", self.discount.clone()),
            ("isNew", self.is_new.to_string()),
        ];

        let mut files = Vec::new();
        if let ImageSelection::Replaced(upload) = &self.image {
            files.push(("image", upload.clone()));
        }
        if let ImageSelection::Replaced(upload) = &self.hover_image {
            files.push(("hoverImage", upload.clone()));
        }

        UpdatePayload { fields, files }
    }
}

/// Reason a submission did not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A previous submission has not settled yet.
    AlreadyInFlight,
    /// The required-field gate failed; nothing was sent.
    Invalid(ValidationError),
}

/// Submission state machine for the edit form.
///
/// Owns the draft plus the busy flag that disables the submit control while
/// an update request is in flight. `begin_submit` validates, flips the flag
/// and hands out the payload; `finish_submit` clears the flag
/// unconditionally once the request settles, success or failure.
#[derive(Debug, Clone, Default)]
pub struct ProductEditor {
    draft: ProductDraft,
    busy: bool,
}

impl ProductEditor {
    /// Create an editor around an existing draft.
    #[must_use]
    pub const fn new(draft: ProductDraft) -> Self {
        Self { draft, busy: false }
    }

    /// Current draft value.
    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Whether an update request is currently in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Replace the draft wholesale from a freshly loaded record.
    ///
    /// The server record wins entirely; any prior draft state is discarded.
    pub fn load_record(&mut self, record: &ProductRecord) {
        self.draft = ProductDraft::from_record(record);
    }

    /// Apply one field edit to the draft.
    pub fn edit(&mut self, edit: FieldEdit) {
        self.draft = core::mem::take(&mut self.draft).apply(edit);
    }

    /// Start a submission: validate, set the busy flag, return the payload.
    ///
    /// On validation failure no busy state is entered and nothing may be
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitBlocked`] when a submission is already in flight or
    /// the required-field gate fails.
    pub fn begin_submit(&mut self) -> Result<UpdatePayload, SubmitBlocked> {
        if self.busy {
            return Err(SubmitBlocked::AlreadyInFlight);
        }
        self.draft.validate().map_err(SubmitBlocked::Invalid)?;
        self.busy = true;
        Ok(self.draft.to_payload())
    }

    /// Mark the in-flight submission as settled, clearing the busy flag.
    ///
    /// Called on both the success and the failure path; the draft is left
    /// untouched so a failed update can be corrected and retried.
    pub fn finish_submit(&mut self) {
        self.busy = false;
    }
}
