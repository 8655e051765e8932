/// What a staged unified diff touches, reduced to what the corroboration
/// rule needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files: Vec<FileChange>,
}

/// One `diff --git` section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileChange {
    /// None for a file created by this change
    pub old_path: Option<String>,
    /// None for a file deleted by this change
    pub new_path: Option<String>,
    /// Rename, copy, mode change, creation or deletion
    pub structural: bool,
    pub binary: bool,
    pub blocks: Vec<ChangeBlock>,
}

/// A run of consecutive removed and added lines inside a hunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBlock {
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl DiffSummary {
    /// Parse `git diff` output
    ///
    /// Content lines are only collected inside hunks, so a removed line that
    /// starts with `--` is never mistaken for a file header. Paths come from
    /// the `---`/`+++` and `rename` lines when present and from the
    /// `diff --git` header otherwise.
    pub fn parse(diff: &str) -> Self {
        let mut files: Vec<FileChange> = Vec::new();
        let mut in_hunk = false;

        for line in diff.lines() {
            if let Some(rest) = line.strip_prefix("diff --git ") {
                in_hunk = false;
                let (old_path, new_path) = header_paths(rest);
                files.push(FileChange {
                    old_path,
                    new_path,
                    ..FileChange::default()
                });
                continue;
            }

            let Some(file) = files.last_mut() else {
                continue;
            };

            if line.starts_with("@@") {
                in_hunk = true;
                file.blocks.push(ChangeBlock::default());
            } else if in_hunk {
                file.record_content(line);
            } else {
                file.record_header(line);
            }
        }

        for file in &mut files {
            file.blocks.retain(|block| !block.is_empty());
        }

        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True when every file changes only in whitespace
    pub fn is_whitespace_only(&self) -> bool {
        self.files.iter().all(FileChange::is_whitespace_only)
    }

    /// True when every touched path, before and after, has one of the
    /// given extensions
    pub fn is_documentation_only(&self, extensions: &[String]) -> bool {
        !self.files.is_empty()
            && self
                .files
                .iter()
                .all(|file| file.is_documentation(extensions))
    }

    /// Whether the diff backs up a trivial-sounding message
    pub fn is_trivial(&self, doc_extensions: &[String]) -> bool {
        self.is_empty() || self.is_whitespace_only() || self.is_documentation_only(doc_extensions)
    }
}

impl FileChange {
    /// Paths this change reads from or writes to
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.old_path.iter().chain(self.new_path.iter()).map(String::as_str)
    }

    /// Content edits that vanish once whitespace is removed, with no
    /// rename, mode change or binary part
    ///
    /// Each block is compared on its own and in order, so re-indenting and
    /// re-wrapping qualify while reordering or moving lines does not.
    pub fn is_whitespace_only(&self) -> bool {
        !self.binary && !self.structural && self.blocks.iter().all(ChangeBlock::is_whitespace_only)
    }

    fn is_documentation(&self, extensions: &[String]) -> bool {
        let mut paths = self.paths().peekable();
        paths.peek().is_some() && paths.all(|path| has_extension(path, extensions))
    }

    fn record_header(&mut self, line: &str) {
        if let Some(path) = line
            .strip_prefix("rename from ")
            .or_else(|| line.strip_prefix("copy from "))
        {
            self.old_path = Some(unquote(path));
            self.structural = true;
        } else if let Some(path) = line
            .strip_prefix("rename to ")
            .or_else(|| line.strip_prefix("copy to "))
        {
            self.new_path = Some(unquote(path));
            self.structural = true;
        } else if ["old mode ", "new mode ", "new file mode ", "deleted file mode "]
            .iter()
            .any(|prefix| line.starts_with(*prefix))
        {
            self.structural = true;
        } else if let Some(path) = line.strip_prefix("--- ") {
            self.old_path = side_path(path, "a/");
        } else if let Some(path) = line.strip_prefix("+++ ") {
            self.new_path = side_path(path, "b/");
        } else if line.starts_with("Binary files ") || line == "GIT binary patch" {
            self.binary = true;
        }
    }

    fn record_content(&mut self, line: &str) {
        let Some(block) = self.blocks.last_mut() else {
            return;
        };

        match line.chars().next() {
            Some('+') => block.added.push(line[1..].to_string()),
            Some('-') => block.removed.push(line[1..].to_string()),
            // "\ No newline at end of file"
            Some('\\') => {}
            _ => {
                if !block.is_empty() {
                    self.blocks.push(ChangeBlock::default());
                }
            }
        }
    }
}

impl ChangeBlock {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    pub fn is_whitespace_only(&self) -> bool {
        squeezed(&self.removed) == squeezed(&self.added)
    }
}

/// Old and new path from the part of a `diff --git` header after the prefix
fn header_paths(rest: &str) -> (Option<String>, Option<String>) {
    // Paths with unusual characters are quoted: "a/x y" "b/x y"
    if let Some((old, new)) = rest.split_once("\" \"") {
        return (
            side_path(&format!("{}\"", old), "a/"),
            side_path(&format!("\"{}", new), "b/"),
        );
    }

    if let Some((old, new)) = rest.strip_prefix("a/").and_then(|r| r.rsplit_once(" b/")) {
        return (Some(old.to_string()), Some(new.to_string()));
    }

    // Without prefixes both halves are the same path unless it was renamed,
    // and renames carry their own header lines
    let mid = rest.len() / 2;
    match (rest.get(..mid), rest.get(mid..)) {
        (Some(old), Some(new)) if new.strip_prefix(' ') == Some(old) => {
            (Some(old.to_string()), Some(old.to_string()))
        }
        _ => (None, None),
    }
}

/// Path from a `---`/`+++` line, None for `/dev/null`
fn side_path(raw: &str, prefix: &str) -> Option<String> {
    // git appends a tab when the name contains a space
    let raw = raw.trim_end_matches('\t');
    if raw == "/dev/null" {
        return None;
    }

    let path = unquote(raw);
    Some(path.strip_prefix(prefix).map(str::to_string).unwrap_or(path))
}

fn unquote(path: &str) -> String {
    match path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => path.to_string(),
    }
}

fn squeezed(lines: &[String]) -> String {
    lines
        .iter()
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn has_extension(file: &str, extensions: &[String]) -> bool {
    let name = file.rsplit('/').next().unwrap_or(file);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext)),
        _ => false,
    }
}
