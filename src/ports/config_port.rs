//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
    fn has_section(&self, section: &str) -> bool;
    /// Keys of `section` in sorted order; empty when the section is absent.
    fn keys(&self, section: &str) -> Vec<String>;
}
