use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    /// Characters which are replaced when sanitizing node names.
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

/// **(internal)** Compute new names for all `nodes` containing characters outside of
/// `[A-Za-z0-9_]`.
///
/// Names are processed in sorted order. Every offending character becomes `_` and a name
/// which is already taken receives a numeric suffix (`_2`, `_3`, ...). Nodes which need no
/// change are not part of the result.
pub(crate) fn sanitized_names<'a, I>(nodes: I) -> IndexMap<String, String>
where
    I: Iterator<Item = &'a str>,
{
    let mut names = nodes.map(|it| it.to_string()).collect::<Vec<_>>();
    names.sort();
    let mut taken = names.iter().cloned().collect::<HashSet<_>>();
    let mut renamed = IndexMap::new();
    for name in names {
        let base = NON_WORD.replace_all(&name, "_").to_string();
        if base == name {
            continue;
        }
        let mut sanitized = base.clone();
        let mut tag = 2;
        while taken.contains(&sanitized) {
            sanitized = format!("{}_{}", base, tag);
            tag += 1;
        }
        taken.remove(&name);
        taken.insert(sanitized.clone());
        renamed.insert(name, sanitized);
    }
    renamed
}

/// **(internal)** The `old -> new` lookup table used to rename references in formulas.
pub(crate) fn rename_table(renamed: &IndexMap<String, String>) -> HashMap<String, String> {
    renamed
        .iter()
        .map(|(old, new)| (old.clone(), new.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitized_names;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitized_name_collisions() {
        let renamed = sanitized_names(vec!["a-b", "a_b", "a.b", "c"].into_iter());
        assert_eq!(
            vec![("a-b", "a_b_2"), ("a.b", "a_b_3")],
            renamed
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect::<Vec<_>>()
        );
    }
}
