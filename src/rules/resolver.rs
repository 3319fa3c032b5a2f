//! Layered ignore-rule resolution.
//!
//! The resolver owns the append-only rule set for one dump run. It is seeded from the root
//! ignore files and grows as the walker registers nested `.gitignore` files. Matching is a
//! plain OR over every rule; there is no negation. Glob rules are compiled into one
//! [`GlobSet`] so each path is tested against all of them in a single pass.

use crate::domain::{DumpOptions, AI_IGNORE_FILE, VCS_IGNORE_FILE, VCS_METADATA_RULE};
use crate::error::Result;
use crate::rules::source::read_ignore_file;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// How a single rule tests a path.
#[derive(Debug, Clone)]
enum Matcher {
    /// Pattern ends in `/`: any path starting with it matches.
    DirPrefix,
    Glob(Glob, GlobMatcher),
    /// Pattern the glob compiler rejected. Never matches.
    Invalid,
}

/// One ignore pattern and the directory scope it was declared in.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    scope: String,
    matcher: Matcher,
}

impl IgnoreRule {
    /// Build a rule from a pattern already joined with its scope.
    pub fn new(pattern: impl Into<String>, scope: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let scope = scope.into().trim_end_matches('/').to_string();
        let matcher = if pattern.ends_with('/') {
            Matcher::DirPrefix
        } else {
            match GlobBuilder::new(&pattern).literal_separator(true).build() {
                Ok(glob) => {
                    let matcher = glob.compile_matcher();
                    Matcher::Glob(glob, matcher)
                }
                Err(err) => {
                    tracing::debug!("Ignoring malformed pattern {:?}: {}", pattern, err);
                    Matcher::Invalid
                }
            }
        };
        Self { pattern, scope, matcher }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.matcher, Matcher::Invalid)
    }

    /// Test a forward-slash path relative to the dump root.
    pub fn matches(&self, relative_path: &str) -> bool {
        if !self.in_scope(relative_path) {
            return false;
        }
        match &self.matcher {
            Matcher::DirPrefix => relative_path.starts_with(&self.pattern),
            Matcher::Glob(_, glob) => glob.is_match(relative_path),
            Matcher::Invalid => false,
        }
    }

    fn glob(&self) -> Option<&Glob> {
        match &self.matcher {
            Matcher::Glob(glob, _) => Some(glob),
            _ => None,
        }
    }

    fn is_dir_prefix(&self) -> bool {
        matches!(self.matcher, Matcher::DirPrefix)
    }

    fn in_scope(&self, relative_path: &str) -> bool {
        if self.scope.is_empty() {
            return true;
        }
        relative_path
            .strip_prefix(self.scope.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Accumulates ignore rules for one dump and answers "is this path ignored?".
#[derive(Debug)]
pub struct IgnoreResolver {
    root: PathBuf,
    rules: Vec<IgnoreRule>,
    respect_gitignore: bool,
    /// Compiled glob rules, or `None` if the set failed to build.
    glob_set: Option<GlobSet>,
    /// Rule index for each glob in `glob_set`.
    glob_rules: Vec<usize>,
}

impl IgnoreResolver {
    /// Seed the rule set from the fixed `.git/` rule, `<root>/.aiignore`,
    /// `<root>/.gitignore`, and any extra patterns in `options`.
    pub fn new(root: &Path, options: &DumpOptions) -> Result<Self> {
        let mut resolver = Self {
            root: root.to_path_buf(),
            rules: vec![IgnoreRule::new(VCS_METADATA_RULE, "")],
            respect_gitignore: options.respect_gitignore,
            glob_set: None,
            glob_rules: Vec::new(),
        };

        for pattern in read_ignore_file(&root.join(AI_IGNORE_FILE), "")? {
            resolver.push(pattern, "");
        }

        if resolver.respect_gitignore {
            for pattern in read_ignore_file(&root.join(VCS_IGNORE_FILE), "")? {
                resolver.push(pattern, "");
            }
        }

        for pattern in &options.exclude {
            let pattern = pattern.trim();
            if !pattern.is_empty() {
                resolver.push(pattern.to_string(), "");
            }
        }

        resolver.rebuild_glob_set();
        tracing::debug!(
            "Seeded {} ignore rules for {}",
            resolver.rules.len(),
            resolver.root.display()
        );
        Ok(resolver)
    }

    fn push(&mut self, pattern: String, scope: &str) {
        self.rules.push(IgnoreRule::new(pattern, scope));
    }

    fn rebuild_glob_set(&mut self) {
        let mut builder = GlobSetBuilder::new();
        let mut glob_rules = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(glob) = rule.glob() {
                builder.add(glob.clone());
                glob_rules.push(index);
            }
        }

        match builder.build() {
            Ok(set) => {
                self.glob_set = Some(set);
                self.glob_rules = glob_rules;
            }
            Err(err) => {
                tracing::warn!("Could not compile ignore globs, matching one by one: {}", err);
                self.glob_set = None;
                self.glob_rules.clear();
            }
        }
    }

    /// Append rules from the `.gitignore` directly inside `directory`, scoped to
    /// `relative_scope`. Returns how many rules were added.
    pub fn register(&mut self, directory: &Path, relative_scope: &str) -> Result<usize> {
        if !self.respect_gitignore {
            return Ok(0);
        }

        let ignore_path = directory.join(VCS_IGNORE_FILE);
        let patterns = read_ignore_file(&ignore_path, relative_scope)?;
        let added = patterns.len();
        for pattern in patterns {
            self.push(pattern, relative_scope);
        }

        if added > 0 {
            self.rebuild_glob_set();
            tracing::debug!("Registered {} rules from {}", added, ignore_path.display());
        }
        Ok(added)
    }

    /// True if any rule matches `relative_path`.
    pub fn matches(&self, relative_path: &str) -> bool {
        let Some(set) = &self.glob_set else {
            return self.rules.iter().any(|rule| rule.matches(relative_path));
        };

        if self.rules.iter().any(|rule| rule.is_dir_prefix() && rule.matches(relative_path)) {
            return true;
        }
        set.matches(relative_path)
            .into_iter()
            .any(|hit| self.rules[self.glob_rules[hit]].in_scope(relative_path))
    }

    /// Like [`matches`](Self::matches), but also tries the path with a trailing `/` so
    /// that directory patterns prune the directory itself.
    pub fn matches_dir(&self, relative_path: &str) -> bool {
        if self.matches(relative_path) {
            return true;
        }
        let with_slash = format!("{}/", relative_path.trim_end_matches('/'));
        self.matches(&with_slash)
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }
}
