pub mod errors;
pub mod generate;
pub mod github;
pub mod locate;
pub mod parse;
pub mod pipeline;
pub mod publish;
