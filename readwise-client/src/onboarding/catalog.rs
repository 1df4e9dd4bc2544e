//! Fixed catalogs offered by the onboarding wizard

/// Reading interest tags, in display order
pub const INTERESTS: [&str; 29] = [
    "mystery",
    "crime",
    "thriller",
    "romance",
    "love",
    "fantasy",
    "magic",
    "science fiction",
    "scifi",
    "horror",
    "adventure",
    "travel",
    "historical fiction",
    "history",
    "young adult",
    "ya",
    "teen",
    "children",
    "kids",
    "science",
    "physics",
    "biology",
    "non-fiction",
    "biography",
    "memoir",
    "self-help",
    "business",
    "economics",
    "poetry",
];

/// Followable author
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogAuthor {
    pub id: i64,
    pub name: &'static str,
}

const fn author(id: i64, name: &'static str) -> CatalogAuthor {
    CatalogAuthor { id, name }
}

/// Followable authors, in display order; ids are unique
pub const AUTHORS: &[CatalogAuthor] = &[
    author(1077326, "J.K. Rowling"),
    author(3389, "Stephen King"),
    author(153394, "Suzanne Collins"),
    author(941441, "Stephenie Meyer"),
    author(656983, "J.R.R. Tolkien"),
    author(15872, "Rick Riordan"),
    author(2927, "Mary GrandPre"),
    author(630, "Dan Brown"),
    author(150038, "Cassandra Clare"),
    author(947, "William Shakespeare"),
    author(1406384, "John Green"),
    author(3780, "James Patterson"),
    author(1265, "Jane Austen"),
    author(2345, "Nicholas Sparks"),
    author(1069006, "C.S. Lewis"),
    author(3706, "George Orwell"),
    author(1221698, "Neil Gaiman"),
    author(4039811, "Veronica Roth"),
    author(346732, "George R.R. Martin"),
    author(1244, "Mark Twain"),
    author(721, "John Grisham"),
    author(1825, "Harper Lee"),
    author(706255, "Stieg Larsson"),
    author(1654, "Terry Pratchett"),
    author(625, "Nora Roberts"),
    author(3190, "F. Scott Fitzgerald"),
    author(569, "Khaled Hosseini"),
    author(7128, "Jodi Picoult"),
    author(585, "John Steinbeck"),
    author(17061, "Charlaine Harris"),
    author(2384, "Janet Evanovich"),
    author(4725841, "E.L. James"),
    author(6765, "Virginia Woolf"),
    author(137902, "Richelle Mead"),
    author(123715, "Agatha Christie"),
    author(239579, "Charles Dickens"),
    author(2383, "Gillian Flynn"),
    author(819789, "J.D. Salinger"),
    author(61105, "Dr. Seuss"),
    author(2565625, "Reg Keeland"),
    author(4273, "Roald Dahl"),
    author(3500, "Anna Quindlen"),
    author(146, "Quentin Blake"),
    author(566, "Paulo Coelho"),
    author(435477, "Shel Silverstein"),
    author(30916, "Garth Williams"),
    author(4, "Orson Scott Card"),
    author(6160, "Sophie Kinsella"),
    author(589, "Anne Frank"),
    author(3720, "Douglas Adams"),
    author(2493, "Lois Lowry"),
    author(38550, "Brandon Sanderson"),
    author(9355, "Dean Koontz"),
    author(44566, "Eleanor Roosevelt"),
    author(14116317, "B.M. Mooyaart-Doubleday"),
    author(2778055, "Kurt Vonnegut Jr."),
    author(5194, "Michael Crichton"),
    author(10746, "Jim Butcher"),
    author(8349, "Christopher Paolini"),
    author(44524, "P.C. Cast"),
    author(2022, "Robert Jordan"),
];

pub fn is_known_interest(tag: &str) -> bool {
    INTERESTS.contains(&tag)
}

/// Look up an author by the id string used in `followedAuthors`
pub fn find_author(id: &str) -> Option<&'static CatalogAuthor> {
    let id: i64 = id.trim().parse().ok()?;
    AUTHORS.iter().find(|a| a.id == id)
}
