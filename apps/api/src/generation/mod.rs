//! Document generation: CV, cover letter and statement of purpose.
//! Model output is extracted into a record where one is expected and handed to
//! the document assembler; anything unparseable is rendered as plain text.

pub mod download;
pub mod handlers;
pub mod prompts;
pub mod request;
