use std::collections::HashMap;

/// Station → ordered list of stations considered nearby
///
/// Groups are not assumed to be symmetric: a lookup always uses the acting
/// user's own group.
#[derive(Debug, Clone, Default)]
pub struct ProximityGroups {
    groups: HashMap<String, Vec<String>>,
}

impl ProximityGroups {
    pub fn new(groups: HashMap<String, Vec<String>>) -> Self {
        Self { groups }
    }

    pub fn insert(&mut self, station: impl Into<String>, nearby: Vec<String>) {
        self.groups.insert(station.into(), nearby);
    }

    /// Nearby group for `area`
    ///
    /// Falls back to a singleton group when the area has no entry.
    pub fn group_for<'a>(&'a self, area: &'a str) -> NearbyGroup<'a> {
        let stations = self.groups.get(area).map(Vec::as_slice).unwrap_or(&[]);
        if stations.is_empty() {
            tracing::trace!("No proximity group for {}, using singleton", area);
        }
        NearbyGroup { area, stations }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Borrowed view of one user's proximity group, always including the home area
#[derive(Debug, Clone, Copy)]
pub struct NearbyGroup<'a> {
    area: &'a str,
    stations: &'a [String],
}

impl<'a> NearbyGroup<'a> {
    pub fn area(&self) -> &'a str {
        self.area
    }

    #[inline]
    pub fn contains(&self, station: &str) -> bool {
        station == self.area || self.stations.iter().any(|s| s == station)
    }

    /// Stations in group order, with the home area appended if the group omits it
    pub fn stations(&self) -> Vec<&'a str> {
        let mut out: Vec<&'a str> = self.stations.iter().map(String::as_str).collect();
        if !out.contains(&self.area) {
            out.push(self.area);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> ProximityGroups {
        let mut groups = ProximityGroups::default();
        groups.insert("渋谷", vec!["渋谷".into(), "恵比寿".into(), "表参道".into()]);
        groups.insert("恵比寿", vec!["恵比寿".into(), "代官山".into()]);
        groups
    }

    #[test]
    fn test_group_lookup() {
        let groups = groups();
        let shibuya = groups.group_for("渋谷");

        assert!(shibuya.contains("渋谷"));
        assert!(shibuya.contains("恵比寿"));
        assert!(!shibuya.contains("代官山"));
    }

    #[test]
    fn test_group_not_symmetric() {
        let groups = groups();

        // 恵比寿 lists 代官山 but not 渋谷
        assert!(!groups.group_for("恵比寿").contains("渋谷"));
        assert!(groups.group_for("渋谷").contains("恵比寿"));
    }

    #[test]
    fn test_missing_group_is_singleton() {
        let groups = groups();
        let ikebukuro = groups.group_for("池袋");

        assert!(ikebukuro.contains("池袋"));
        assert!(!ikebukuro.contains("渋谷"));
        assert_eq!(ikebukuro.stations(), vec!["池袋"]);
    }

    #[test]
    fn test_group_is_self_inclusive() {
        let mut groups = ProximityGroups::default();
        groups.insert("新宿", vec!["代々木".into()]);
        let shinjuku = groups.group_for("新宿");

        assert!(shinjuku.contains("新宿"));
        assert_eq!(shinjuku.stations(), vec!["代々木", "新宿"]);
    }
}
