use itertools::Itertools;
use std::fmt;
use std::iter::FromIterator;

/// Set of 1-based feature indices.
///
/// Membership is what matters for the evaluation, but we keep the order in which the features
/// were added so reports show the path of the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct FeatureSubset {
    features: Vec<usize>,
}

impl FeatureSubset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, feature: usize) -> bool {
        self.features.contains(&feature)
    }

    /// Features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.features.iter().cloned()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.features.clone()
    }

    /// Features in ascending order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut features = self.features.clone();
        features.sort_unstable();
        features
    }

    /// Add a feature at the end. Returns false if it was already there.
    pub fn insert(&mut self, feature: usize) -> bool {
        if self.contains(feature) {
            return false;
        }
        self.features.push(feature);
        true
    }

    /// Returns false if the feature wasn't there.
    pub fn remove(&mut self, feature: usize) -> bool {
        match self.features.iter().position(|&f| f == feature) {
            Some(pos) => {
                self.features.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn with(&self, feature: usize) -> Self {
        let mut subset = self.clone();
        subset.insert(feature);
        subset
    }

    pub fn without(&self, feature: usize) -> Self {
        let mut subset = self.clone();
        subset.remove(feature);
        subset
    }

    /// Same features, whatever the order.
    pub fn same_features(&self, other: &FeatureSubset) -> bool {
        self.sorted() == other.sorted()
    }
}

impl FromIterator<usize> for FeatureSubset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut subset = FeatureSubset::new();
        for feature in iter {
            subset.insert(feature);
        }
        subset
    }
}

// Deserialization goes through `collect`, so duplicates are dropped
impl From<Vec<usize>> for FeatureSubset {
    fn from(features: Vec<usize>) -> Self {
        features.into_iter().collect()
    }
}

impl From<FeatureSubset> for Vec<usize> {
    fn from(subset: FeatureSubset) -> Self {
        subset.features
    }
}

impl<'a> From<&'a [usize]> for FeatureSubset {
    fn from(features: &'a [usize]) -> Self {
        features.iter().cloned().collect()
    }
}

impl fmt::Display for FeatureSubset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.features.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut subset = FeatureSubset::new();
        assert!(subset.is_empty());
        assert!(subset.insert(4));
        assert!(subset.insert(1));
        assert!(!subset.insert(4));
        assert_eq!(subset.to_vec(), vec![4, 1]);
        assert_eq!(subset.sorted(), vec![1, 4]);

        assert!(subset.remove(4));
        assert!(!subset.remove(4));
        assert_eq!(subset.to_vec(), vec![1]);
    }

    #[test]
    fn test_with_without_return_copies() {
        let subset: FeatureSubset = vec![3, 1].into_iter().collect();
        assert_eq!(subset.with(2).to_vec(), vec![3, 1, 2]);
        assert_eq!(subset.without(3).to_vec(), vec![1]);
        assert_eq!(subset.to_vec(), vec![3, 1]);
    }

    #[test]
    fn test_from_iter_dedup() {
        let subset = FeatureSubset::from(&[2, 2, 5, 2][..]);
        assert_eq!(subset.len(), 2);
        assert!(subset.same_features(&FeatureSubset::from(&[5, 2][..])));
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let subset: FeatureSubset = serde_json::from_str("[1, 1, 3]").unwrap();
        assert_eq!(subset.to_vec(), vec![1, 3]);
        assert_eq!(serde_json::to_string(&subset).unwrap(), "[1,3]");
    }

    #[test]
    fn test_display() {
        assert_eq!(FeatureSubset::new().to_string(), "{}");
        assert_eq!(FeatureSubset::from(&[1, 4, 2][..]).to_string(), "{1,4,2}");
    }
}
