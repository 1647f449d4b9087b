pub mod obj;
pub mod parse_utils;

pub use self::obj::{load_obj, ObjError};
