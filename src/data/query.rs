use std::collections::{BTreeSet, HashMap};

use super::model::{Category, CohortData, CohortFilter, HouseRosters, PersonRecord};

// ---------------------------------------------------------------------------
// Membership queries over a loaded roster
// ---------------------------------------------------------------------------

impl CohortData {
    /// Every non-empty house name.
    pub fn houses(&self) -> BTreeSet<String> {
        self.people
            .iter()
            .filter(|p| p.has_house())
            .map(|p| p.house.clone())
            .collect()
    }

    /// Full names matching the filter, sorted ascending.
    ///
    /// * `All` → every record with a house (ghosts and instructors excluded)
    /// * `Named(c)` → every record whose cohort is exactly `c`
    pub fn students_by_cohort(&self, filter: &CohortFilter) -> Vec<String> {
        let mut names: Vec<String> = self
            .people
            .iter()
            .filter(|p| match filter {
                CohortFilter::All => p.has_house(),
                CohortFilter::Named(cohort) => p.cohort == *cohort,
            })
            .map(|p| p.full_name.clone())
            .collect();
        names.sort();
        names
    }

    /// Names grouped into the seven categories. Unclassified records are dropped.
    pub fn names_by_house(&self) -> HouseRosters {
        let mut rosters = HouseRosters::default();
        for person in &self.people {
            if let Some(cat) = Category::classify(person) {
                rosters.push(cat, person.full_name.clone());
            }
        }
        rosters.sort();
        rosters
    }

    /// Cohort of the first record named exactly `name`.
    pub fn cohort_for(&self, name: &str) -> Option<&str> {
        self.find(name).map(|p| p.cohort.as_str())
    }

    /// First record named exactly `name`.
    pub fn find(&self, name: &str) -> Option<&PersonRecord> {
        self.people.iter().find(|p| p.full_name == name)
    }

    /// Last names carried by two or more records.
    pub fn duped_last_names(&self) -> BTreeSet<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for last in self.people.iter().filter_map(PersonRecord::last_name) {
            *counts.entry(last).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, n)| n >= 2)
            .map(|(last, _)| last.to_string())
            .collect()
    }

    /// Others sharing both house and cohort with any record named `name`.
    pub fn housemates_for(&self, name: &str) -> BTreeSet<String> {
        let mut mates = BTreeSet::new();
        for me in self.people.iter().filter(|p| p.full_name == name) {
            mates.extend(
                self.people
                    .iter()
                    .filter(|other| {
                        other.house == me.house
                            && other.cohort == me.cohort
                            && other.full_name != me.full_name
                    })
                    .map(|other| other.full_name.clone()),
            );
        }
        mates
    }
}
