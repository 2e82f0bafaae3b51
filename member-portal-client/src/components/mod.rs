pub mod credentials;
pub mod nav;
pub mod status;

/// Text for an optional value, `-` when it is missing
pub fn display_option<T: ToString>(val: Option<T>) -> String {
    if let Some(val) = val {
        return val.to_string();
    }
    "-".to_owned()
}
