use crate::models::{Mirror, MirrorType};
use crate::xml_tree::XmlNode;

/// Normalizes the mirrors document
///
/// `mirrorpath` becomes the mirror URL and `typemask` is decoded into content
/// kinds. A missing or non-numeric typemask counts as 0.
pub fn normalize_mirrors(tree: &XmlNode) -> Vec<Mirror> {
    tree.children("Mirror")
        .into_vec()
        .into_iter()
        .map(|mirror| {
            let typemask = mirror
                .field("typemask")
                .and_then(|mask| mask.parse::<u32>().ok())
                .unwrap_or(0);

            Mirror {
                id: mirror.field_or_default("id"),
                url: mirror.field_or_default("mirrorpath"),
                types: MirrorType::from_typemask(typemask),
            }
        })
        .collect()
}
