#![recursion_limit = "1024"]

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {}
    foreign_links {
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
        Regex(regex::Error);
    }
    errors {
        Validation(errors: Vec<validation::FieldError>) {
            description("validation failure list")
            display("validation failure list:\n{}", validation::format_list(errors))
        }
        Encoding(model: String) {
            description("model could not be encoded")
            display("could not encode {}", model)
        }
        Decoding(model: String) {
            description("model could not be decoded")
            display("could not decode {}", model)
        }
        InvalidFormat(name: String) {
            description("invalid format pattern")
            display("pattern for format '{}' does not compile", name)
        }
    }
}

/// Field level errors and the `Validate` trait
pub mod validation;
pub use validation::{FieldError, Validate};

/// Named string formats used by validators
pub mod formats;
pub use formats::Formats;

/// Ambient context for context-aware validation
pub mod context;
pub use context::{Environment, ValidationContext};

/// Binary (json) and yaml encoding of models
pub mod codec;
pub use codec::{marshal_binary, Binary};

/// Serde helpers shared by the models
mod deserializers;

/// Api models
pub mod structs;
pub use structs::{FsGroupChangePolicy, PrometheusConfiguration, SecurityContext};
