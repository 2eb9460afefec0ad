use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// PersonRecord – one line of the roster file
// ---------------------------------------------------------------------------

/// A single person parsed from `first|last|house|advisor|cohort`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    /// First and last name joined by a single space.
    pub full_name: String,
    /// Empty for ghosts and instructors.
    pub house: String,
    pub advisor: String,
    /// Term label ("Fall 2015") or a category code (`G`, `I`).
    pub cohort: String,
}

impl PersonRecord {
    /// Build a record from the five raw fields.
    pub fn new(first: &str, last: &str, house: &str, advisor: &str, cohort: &str) -> Self {
        PersonRecord {
            full_name: format!("{first} {last}"),
            house: house.to_string(),
            advisor: advisor.to_string(),
            cohort: cohort.trim().to_string(),
        }
    }

    /// Second whitespace token of the full name, if there is one.
    pub fn last_name(&self) -> Option<&str> {
        self.full_name.split_whitespace().nth(1)
    }

    /// False for ghosts and instructors.
    pub fn has_house(&self) -> bool {
        !self.house.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Category – the seven roster buckets
// ---------------------------------------------------------------------------

/// Cohort code marking a ghost.
pub const GHOST_CODE: &str = "G";
/// Cohort code marking an instructor.
pub const INSTRUCTOR_CODE: &str = "I";

/// Roster categories, declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    DumbledoresArmy,
    Gryffindor,
    Hufflepuff,
    Ravenclaw,
    Slytherin,
    Ghosts,
    Instructors,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::DumbledoresArmy,
        Category::Gryffindor,
        Category::Hufflepuff,
        Category::Ravenclaw,
        Category::Slytherin,
        Category::Ghosts,
        Category::Instructors,
    ];

    /// House name for the five house categories.
    pub fn house_name(self) -> Option<&'static str> {
        match self {
            Category::DumbledoresArmy => Some("Dumbledore's Army"),
            Category::Gryffindor => Some("Gryffindor"),
            Category::Hufflepuff => Some("Hufflepuff"),
            Category::Ravenclaw => Some("Ravenclaw"),
            Category::Slytherin => Some("Slytherin"),
            Category::Ghosts | Category::Instructors => None,
        }
    }

    /// First matching category. House checks come before the cohort codes,
    /// so a housed record with cohort `G` still lands in its house.
    pub fn classify(person: &PersonRecord) -> Option<Category> {
        if let Some(cat) = Category::ALL
            .iter()
            .copied()
            .find(|cat| cat.house_name() == Some(person.house.as_str()))
        {
            return Some(cat);
        }
        match person.cohort.as_str() {
            GHOST_CODE => Some(Category::Ghosts),
            INSTRUCTOR_CODE => Some(Category::Instructors),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.house_name() {
            Some(name) => write!(f, "{name}"),
            None if *self == Category::Ghosts => write!(f, "Ghosts"),
            None => write!(f, "Instructors"),
        }
    }
}

// ---------------------------------------------------------------------------
// CohortFilter – argument of the students-by-cohort query
// ---------------------------------------------------------------------------

/// Which students to list: every house member, or one exact cohort label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CohortFilter {
    #[default]
    All,
    Named(String),
}

impl From<&str> for CohortFilter {
    fn from(s: &str) -> Self {
        if s == "All" {
            CohortFilter::All
        } else {
            CohortFilter::Named(s.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// HouseRosters – sorted name lists per category
// ---------------------------------------------------------------------------

/// Seven name lists, one per [`Category`], each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseRosters {
    lists: [Vec<String>; 7],
}

impl HouseRosters {
    pub(crate) fn push(&mut self, category: Category, name: String) {
        self.lists[category.index()].push(name);
    }

    pub(crate) fn sort(&mut self) {
        for list in &mut self.lists {
            list.sort();
        }
    }

    /// Names in one category.
    pub fn get(&self, category: Category) -> &[String] {
        &self.lists[category.index()]
    }

    /// `(category, names)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL.into_iter().map(|cat| (cat, self.get(cat)))
    }

    /// The lists alone, in output order.
    pub fn into_lists(self) -> [Vec<String>; 7] {
        self.lists
    }
}

impl Serialize for HouseRosters {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.lists.len()))?;
        for (cat, names) in self.iter() {
            map.serialize_entry(&cat.to_string(), names)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// CohortData – the complete parsed file
// ---------------------------------------------------------------------------

/// All records of one roster file, in file order.
#[derive(Debug, Clone, Default)]
pub struct CohortData {
    pub people: Vec<PersonRecord>,
}

impl CohortData {
    /// Wrap parsed records, keeping their order.
    pub fn from_records(people: Vec<PersonRecord>) -> Self {
        CohortData { people }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the file had no records.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
