use crate::models::Language;
use crate::xml_tree::XmlNode;

/// Normalizes the languages document
///
/// A document with a single `<Language>` element yields a one-element list,
/// a document without any yields an empty list.
pub fn normalize_languages(tree: &XmlNode) -> Vec<Language> {
    tree.children("Language")
        .into_vec()
        .into_iter()
        .map(|language| Language {
            id: language.field_or_default("id"),
            name: language.field_or_default("name"),
            abbreviation: language.field_or_default("abbreviation"),
        })
        .collect()
}
