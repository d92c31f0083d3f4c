mod normalize;
pub use normalize::normalize;

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod value_chrono;

mod value_json;
