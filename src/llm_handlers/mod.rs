pub mod chat;
pub mod error;
pub mod http;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod together;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_upstream;
