// crates/tasklist-core/src/core/mod.rs
// ============================================================================
// Module: Tasklist Core Types
// Description: Item records, flash messages, and form validators.
// Purpose: Provide the typed vocabulary shared by stores and transports.
// Dependencies: serde, thiserror, url
// ============================================================================

//! ## Overview
//! Core types define the to-do item record, the one-time flash messages shown
//! on the list page, and the validators that coerce submitted form fields.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod flash;
pub mod item;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use flash::FlashLevel;
pub use flash::FlashMessage;
pub use flash::STARTING_FRESH;
pub use item::Description;
pub use item::DescriptionError;
pub use item::ItemId;
pub use item::MAX_DESCRIPTION_BYTES;
pub use item::ToDoItem;
pub use validation::CreateForm;
pub use validation::DeleteForm;
pub use validation::FieldError;
pub use validation::FieldErrorKind;
pub use validation::FormFields;
pub use validation::UpdateForm;
pub use validation::ValidationError;
