pub mod romaji;
pub mod settings;
pub mod tokenizer;
pub mod unicode;
