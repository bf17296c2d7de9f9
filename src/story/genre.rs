//! Mapping of catalog categories to the Portuguese genre labels shown on cards

const GENRE_TRANSLATIONS: &[(&str, &str)] = &[
    ("fiction", "Ficção"),
    ("literary fiction", "Drama"),
    ("science fiction", "Ficção científica"),
    ("sci-fi", "Ficção científica"),
    ("fantasy", "Fantasia"),
    ("romance", "Romance"),
    ("mystery", "Mistério"),
    ("thrillers", "Suspense"),
    ("thriller", "Suspense"),
    ("suspense", "Suspense"),
    ("horror", "Terror"),
    ("adventure", "Aventura"),
    ("action & adventure", "Aventura"),
    ("young adult fiction", "Young Adult"),
    ("young adult nonfiction", "Young Adult"),
    ("young adult", "Young Adult"),
    ("juvenile fiction", "Infantil"),
    ("juvenile nonfiction", "Infantil"),
    ("children", "Infantil"),
    ("poetry", "Poesia"),
    ("drama", "Drama"),
    ("history", "História"),
    ("biography & autobiography", "Biografia"),
    ("biography", "Biografia"),
    ("nonfiction", "Não ficção"),
    ("self-help", "Autodesenvolvimento"),
    ("health & fitness", "Saúde e fitness"),
    ("business & economics", "Negócios"),
    ("psychology", "Psicologia"),
    ("philosophy", "Filosofia"),
    ("religion", "Religião"),
    ("travel", "Viagem"),
    ("cooking", "Culinária"),
    ("sports & recreation", "Esportes"),
    ("technology & engineering", "Tecnologia"),
    ("science", "Ciência"),
    ("social science", "Ciências sociais"),
    ("education", "Educação"),
    ("computers", "Computação"),
    ("humor", "Humor"),
    ("true crime", "Crime real"),
    ("art", "Arte"),
    ("music", "Música"),
    ("photography", "Fotografia"),
    ("language arts & disciplines", "Linguagem"),
    ("house & home", "Casa"),
    ("pets", "Animais"),
    ("games & activities", "Jogos"),
    ("family & relationships", "Família"),
    ("medical", "Medicina"),
    ("nature", "Natureza"),
    ("political science", "Política"),
    ("law", "Direito"),
    ("reference", "Referência"),
    ("comics & graphic novels", "Quadrinhos"),
];

/// Lowercased with inner whitespace collapsed
pub fn normalize_genre_key(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn lookup(segment: &str) -> Option<&'static str> {
    let key = normalize_genre_key(segment);
    GENRE_TRANSLATIONS
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

/// Translate a category such as `"Fiction / Fantasy / Epic"`.
///
/// The whole value is tried first, then hierarchy segments (split on `/` or
/// `>`) from the most specific one. Untranslatable values come back trimmed.
pub fn translate_genre(value: &str) -> String {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return value.to_string();
    }

    if let Some(direct) = lookup(cleaned) {
        return direct.to_string();
    }

    cleaned
        .split(|c: char| c == '/' || c == '>')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .rev()
        .find_map(lookup)
        .map(str::to_string)
        .unwrap_or_else(|| cleaned.to_string())
}

/// Translated, de-duplicated genres for a book's categories, in input order
pub fn book_genres(categories: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    let mut genres = Vec::new();
    for category in categories {
        if category.trim().is_empty() {
            continue;
        }
        let translated = translate_genre(category);
        let key = normalize_genre_key(&translated);
        if !seen.contains(&key) {
            seen.push(key);
            genres.push(translated);
        }
    }
    genres
}
