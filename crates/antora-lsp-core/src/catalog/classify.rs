//! Classify aggregated files into families.
//!
//! A file at `modules/<module>/<family dir>/<relative>` becomes a catalog
//! entry of that family. Files named in the descriptor's `nav` list are
//! classified as `nav`. Everything else is dropped.

use super::aggregate::{ComponentVersionBucket, VirtualFile};
use super::{CatalogFile, ContentCatalog};
use crate::types::{Family, ResourceIdentity};

/// Work out module, family and family-relative path for one file.
fn classify_path(path: &str, nav: &[String]) -> Option<(String, Family, String)> {
    let rest = path.strip_prefix("modules/")?;
    let (module, rest) = rest.split_once('/')?;
    if module.is_empty() {
        return None;
    }

    if nav.iter().any(|n| n == path) {
        return Some((module.to_string(), Family::Nav, rest.to_string()));
    }

    let (dir, relative) = rest.split_once('/')?;
    let (family, relative) = match dir {
        "assets" => {
            let (asset_dir, relative) = relative.split_once('/')?;
            match asset_dir {
                "images" => (Family::Image, relative),
                "attachments" => (Family::Attachment, relative),
                _ => return None,
            }
        }
        _ => (Family::from_dir_name(dir)?, relative),
    };

    if relative.is_empty() || (family == Family::Page && !relative.ends_with(".adoc")) {
        return None;
    }
    Some((module.to_string(), family, relative.to_string()))
}

fn classify_file(bucket: &ComponentVersionBucket, file: VirtualFile) -> Option<CatalogFile> {
    let (module, family, relative) = classify_path(&file.path, &bucket.nav)?;
    Some(CatalogFile {
        src: ResourceIdentity {
            component: bucket.name.clone(),
            version: bucket.version.clone(),
            module,
            family,
            relative,
        },
        path: file.path,
        abspath: file.abspath,
    })
}

/// Build a content catalog from aggregated component versions.
pub fn classify_content(aggregate: Vec<ComponentVersionBucket>) -> ContentCatalog {
    let mut catalog = ContentCatalog::new();

    for mut bucket in aggregate {
        catalog.register_component_version(&bucket.name, &bucket.version);
        let files = std::mem::take(&mut bucket.files);
        for file in files {
            if let Some(entry) = classify_file(&bucket, file) {
                catalog.add_file(entry);
            }
        }
    }

    tracing::debug!(files = catalog.len(), "Classified content");
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn classify(path: &str) -> Option<(String, Family, String)> {
        classify_path(path, &["modules/ROOT/nav.adoc".to_string()])
    }

    #[test]
    fn family_directories() {
        assert_eq!(
            classify("modules/ROOT/pages/topics/a.adoc"),
            Some(("ROOT".into(), Family::Page, "topics/a.adoc".into()))
        );
        assert_eq!(
            classify("modules/admin/partials/snippet.adoc"),
            Some(("admin".into(), Family::Partial, "snippet.adoc".into()))
        );
        assert_eq!(
            classify("modules/admin/examples/app.rb"),
            Some(("admin".into(), Family::Example, "app.rb".into()))
        );
        assert_eq!(
            classify("modules/ROOT/images/logo.png"),
            Some(("ROOT".into(), Family::Image, "logo.png".into()))
        );
        assert_eq!(
            classify("modules/ROOT/attachments/guide.pdf"),
            Some(("ROOT".into(), Family::Attachment, "guide.pdf".into()))
        );
    }

    #[test]
    fn legacy_asset_directories() {
        assert_eq!(
            classify("modules/ROOT/assets/images/logo.png"),
            Some(("ROOT".into(), Family::Image, "logo.png".into()))
        );
        assert_eq!(
            classify("modules/ROOT/assets/attachments/a.zip"),
            Some(("ROOT".into(), Family::Attachment, "a.zip".into()))
        );
        assert_eq!(classify("modules/ROOT/assets/other/x"), None);
    }

    #[test]
    fn nav_and_unclassified_files() {
        assert_eq!(
            classify("modules/ROOT/nav.adoc"),
            Some(("ROOT".into(), Family::Nav, "nav.adoc".into()))
        );
        assert_eq!(classify("modules/admin/nav.adoc"), None);
        assert_eq!(classify("modules/ROOT/pages/image.png"), None);
        assert_eq!(classify("modules/ROOT/misc/x.adoc"), None);
        assert_eq!(classify("README.adoc"), None);
    }

    #[test]
    fn classify_content_builds_catalog() {
        let bucket = ComponentVersionBucket {
            name: "docs".to_string(),
            version: "1.0".to_string(),
            title: None,
            nav: vec![],
            files: vec![
                VirtualFile {
                    path: "modules/ROOT/pages/index.adoc".to_string(),
                    abspath: PathBuf::from("/ws/docs/modules/ROOT/pages/index.adoc"),
                },
                VirtualFile {
                    path: "modules/ROOT/stray.txt".to_string(),
                    abspath: PathBuf::from("/ws/docs/modules/ROOT/stray.txt"),
                },
            ],
        };

        let catalog = classify_content(vec![bucket]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.latest_version("docs"), Some("1.0"));
    }
}
