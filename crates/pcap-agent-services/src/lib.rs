//! pcap-agent-services — clients for the two external HTTP services.
//!
//! The parser service turns a capture into JSON statistics; the LLM service
//! turns the prompt built from those statistics into a report. Both
//! contracts are consumed as-is. [`pipeline::Analyzer`] chains them with the
//! normalizer and prompt builder from `pcap-agent-core`.

pub mod error;
mod http;
pub mod llm;
pub mod parser;
pub mod pipeline;

pub use error::{Service, ServiceError};
pub use llm::LlmClient;
pub use parser::ParserClient;
pub use pipeline::{Analysis, Analyzer};
