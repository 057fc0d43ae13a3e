//! Problem title to file name conversion
//!
//! A problem's files are named after its slug: the title lowercased with
//! every space replaced by `-`. "Two Sum" becomes `two-sum.cpp` and
//! `two-sum.txt`.

/// Convert a problem title to its slug
///
/// # Example
/// ```
/// use cpsm::problem::slug;
///
/// assert_eq!(slug("Two Sum"), "two-sum");
/// ```
pub fn slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}
