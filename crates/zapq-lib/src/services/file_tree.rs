// File tree helpers
// Pure views over the backend listing used by the sidebar.

use crate::models::FileGroup;

/// Paths containing `term`, ignoring case. A blank term keeps everything.
pub fn filter_files(files: &[String], term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    files
        .iter()
        .filter(|file| needle.is_empty() || file.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Group paths by their first segment, in order of first appearance
pub fn group_by_folder(files: &[String]) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();

    for file in files {
        let folder = file
            .split_once('/')
            .map(|(first, _)| first.to_string());

        match groups.iter_mut().find(|group| group.folder == folder) {
            Some(group) => group.files.push(file.clone()),
            None => groups.push(FileGroup {
                folder,
                files: vec![file.clone()],
            }),
        }
    }

    groups
}
