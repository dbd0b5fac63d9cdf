//! Folder name ordering.
//!
//! Folders whose name contains a collection marker come first, then
//! all-digit names by numeric value, then everything else in byte order.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Collection,
    Numeric,
    Plain,
}

/// Comparator for sibling folder names.
#[derive(Debug, Clone)]
pub struct FolderComparator {
    /// Upper-cased markers.
    markers: Vec<String>,
}

impl Default for FolderComparator {
    fn default() -> Self {
        Self::new(&["COLLECTION".to_string()])
    }
}

impl FolderComparator {
    /// Create a comparator. Markers match case-insensitively anywhere in a
    /// name; blank markers are ignored.
    pub fn new(markers: &[String]) -> Self {
        Self {
            markers: markers
                .iter()
                .map(|m| m.trim().to_uppercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    fn rank(&self, name: &str) -> Rank {
        if !self.markers.is_empty() {
            let upper = name.to_uppercase();
            if self.markers.iter().any(|m| upper.contains(m.as_str())) {
                return Rank::Collection;
            }
        }
        if is_numeric(name) {
            Rank::Numeric
        } else {
            Rank::Plain
        }
    }

    /// Total order over folder names. Only identical names compare equal.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let (ra, rb) = (self.rank(a), self.rank(b));
        ra.cmp(&rb).then_with(|| match ra {
            Rank::Numeric => compare_numeric(a, b).then_with(|| a.cmp(b)),
            Rank::Collection | Rank::Plain => a.cmp(b),
        })
    }

    /// Sort names in place.
    pub fn sort(&self, names: &mut [String]) {
        names.sort_by(|a, b| self.compare(a, b));
    }
}

fn is_numeric(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two all-digit strings by value without parsing, so arbitrarily
/// long names cannot overflow.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        FolderComparator::default().sort(&mut names);
        names
    }

    #[test]
    fn test_numeric_names_sort_by_value() {
        assert_eq!(sorted(&["10", "2", "01"]), vec!["01", "2", "10"]);
        assert_eq!(sorted(&["1", "01", "001"]), vec!["001", "01", "1"]);
        assert_eq!(
            sorted(&["99999999999999999999999", "3"]),
            vec!["3", "99999999999999999999999"]
        );
    }

    #[test]
    fn test_plain_names_sort_lexicographically() {
        assert_eq!(sorted(&["JAN", "FEB", "DEC"]), vec!["DEC", "FEB", "JAN"]);
    }

    #[test]
    fn test_collection_markers_first() {
        assert_eq!(
            sorted(&["2024", "ALPHA", "Summer Collection", "2023"]),
            vec!["Summer Collection", "2023", "2024", "ALPHA"]
        );
    }

    #[test]
    fn test_custom_markers() {
        let cmp = FolderComparator::new(&["pack".into(), " ".into()]);
        let mut names = vec!["zeta".to_string(), "Top Packs".to_string(), "7".to_string()];
        cmp.sort(&mut names);
        assert_eq!(names, vec!["Top Packs", "7", "zeta"]);
    }

    #[test]
    fn test_only_identical_names_are_equal() {
        let cmp = FolderComparator::default();
        assert_eq!(cmp.compare("01", "01"), Ordering::Equal);
        assert_ne!(cmp.compare("01", "1"), Ordering::Equal);
    }
}
