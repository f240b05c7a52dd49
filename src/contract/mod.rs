mod deref;
mod load;
mod source;
mod types;

pub use deref::expand_refs;
pub use load::{load_contract, parse_contract, DocFormat};
pub use source::{CachedSource, FileSource, SchemaSource, StaticSource, UrlSource};
pub use types::{Contract, Operation, ParameterLocation, ParameterMeta, PathItem, ResponseSpec};
