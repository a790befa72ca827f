pub mod content_llm;
pub mod file_storage;
pub mod stub_content;

pub use content_llm::OpenAiContentAdapter;
pub use file_storage::FileStorage;
pub use stub_content::StubContentGenerator;
