//! Manifest entry lookup strategies.
//!
//! Each function applies one fixed chain of strategies and returns the first hit.
//! Scans over the whole manifest follow its key order.

use crate::manifest::{Manifest, ManifestEntry};

/// Final path segment, ignoring trailing slashes.
pub fn basename(path: &str) -> &str {
  let trimmed = path.trim_end_matches('/');
  trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// [`basename`] with `suffix` removed when it is a proper suffix of the segment.
pub fn basename_without<'a>(path: &'a str, suffix: &str) -> &'a str {
  let base = basename(path);
  match base.strip_suffix(suffix) {
    Some(stem) if !stem.is_empty() => stem,
    _ => base,
  }
}

/// Exact key, then the first key sharing the entry's basename.
pub fn find_by_key_or_basename<'m>(
  manifest: &'m Manifest,
  entry: &str,
) -> Option<&'m ManifestEntry> {
  if let Some(found) = manifest.get(entry) {
    return Some(found);
  }
  let wanted = basename(entry);
  manifest
    .iter()
    .find(|(key, _)| basename(key) == wanted)
    .map(|(_, found)| found)
}

/// How a script entry was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMatch<'m> {
  /// A full entry whose imported chunks should be emitted too.
  Entry(&'m ManifestEntry),
  /// A loosely matched output file emitted on its own.
  File(&'m str),
}

/// Script lookup chain: exact key, `.js`-less basename, key substring with a
/// `.js` output, then the `name` field.
pub fn find_script<'m>(manifest: &'m Manifest, entry: &str) -> Option<ScriptMatch<'m>> {
  if let Some(found) = manifest.get(entry) {
    return Some(ScriptMatch::Entry(found));
  }

  if let Some((_, found)) = manifest
    .iter()
    .find(|(key, _)| basename_without(key, ".js") == entry)
  {
    return Some(ScriptMatch::Entry(found));
  }

  if let Some((_, found)) = manifest
    .iter()
    .find(|(key, found)| key.contains(entry) && found.file.ends_with(".js"))
  {
    return Some(ScriptMatch::File(&found.file));
  }

  manifest
    .iter()
    .find(|(_, found)| found.name.as_deref() == Some(entry))
    .map(|(_, found)| ScriptMatch::File(found.file.as_str()))
}

/// Stylesheet lookup chain: the exact key's `css` list, a `.js`-less basename
/// match carrying stylesheets, then the first key containing `entry` whose
/// output is a `.css` file.
///
/// An exact key always ends the search, even when it lists no stylesheets. A
/// basename match only ends it when its `css` list is non-empty, since an empty
/// list and an absent one deserialise the same way.
pub fn find_stylesheets<'m>(manifest: &'m Manifest, entry: &str) -> Vec<&'m str> {
  if let Some(found) = manifest.get(entry) {
    return found.css.iter().map(String::as_str).collect();
  }

  if let Some((_, found)) = manifest
    .iter()
    .find(|(key, found)| basename_without(key, ".js") == entry && !found.css.is_empty())
  {
    return found.css.iter().map(String::as_str).collect();
  }

  manifest
    .iter()
    .find(|(key, found)| key.contains(entry) && found.file.ends_with(".css"))
    .map(|(_, found)| vec![found.file.as_str()])
    .unwrap_or_default()
}
