//! Chat answers grounded on the trusted corpus.
//! The model's reply always goes through the sanitizer before it reaches a client.

pub mod handlers;
pub mod prompts;
