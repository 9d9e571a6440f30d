/// Turns a category slug into a display name: `"mens-shirts"` → `"Mens Shirts"`.
///
/// Each dash-separated word is capitalized; empty segments (double dashes,
/// leading/trailing dashes) are dropped.
#[must_use]
pub fn format_category_name(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
