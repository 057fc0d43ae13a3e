//! Template rendering
//!
//! Code templates, run commands and the generated configuration file are all
//! rendered with minijinja. Variables come from a [`Substitutions`] record
//! built fresh for every invocation.

use anyhow::Result;
use minijinja::Environment;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{Config, Site};

/// Variables available while rendering a template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Substitutions(BTreeMap<String, String>);

impl Substitutions {
    /// Configured mappings plus `name` (site display name) and `problem_name` (slug)
    pub fn for_problem(config: &Config, site: &Site, slug: &str) -> Self {
        Substitutions(config.mappings.clone())
            .with("name", &site.name)
            .with("problem_name", slug)
    }

    /// Add or replace a variable
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Template engine wrapper around minijinja
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Templates are file bodies; keep their final newline
        env.set_keep_trailing_newline(true);
        env.add_filter("toml", toml_string);
        Self { env }
    }

    /// Render a template string with the given variables
    ///
    /// Unknown variables render as empty strings.
    pub fn render<S: Serialize>(&self, source: &str, vars: S) -> Result<String> {
        Ok(self.env.render_str(source, vars)?)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote and escape a value as a TOML string
fn toml_string(value: String) -> String {
    toml::Value::String(value).to_string()
}

/// Split a command line into words
///
/// Whitespace separates words except inside template tags, so
/// `python3 {{ problem_path }}.py` yields two words. Single or double quotes
/// outside tags group a word containing spaces and are dropped, as in
/// `"/opt/My Editor/edit" -w`; there are no backslash escapes. Each word is
/// rendered separately afterwards, which keeps substituted values from ever
/// being split or reinterpreted.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    // Set once a word has begun, so `""` still yields an empty word
    let mut started = false;
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_tag {
            current.push(c);
            if matches!(c, '}' | '%' | '#') && chars.peek() == Some(&'}') {
                current.push('}');
                chars.next();
                in_tag = false;
            }
        } else if c == '{' && matches!(chars.peek(), Some('{' | '%' | '#')) {
            current.push(c);
            if let Some(next) = chars.next() {
                current.push(next);
            }
            in_tag = true;
            started = true;
        } else if quote == Some(c) {
            quote = None;
        } else if quote.is_none() && matches!(c, '"' | '\'') {
            quote = Some(c);
            started = true;
        } else if quote.is_none() && c.is_whitespace() {
            if started {
                words.push(std::mem::take(&mut current));
                started = false;
            }
        } else {
            current.push(c);
            started = true;
        }
    }

    if started {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn site() -> Site {
        Site {
            name: "UVa".to_string(),
            dir: PathBuf::from("uva"),
        }
    }

    fn config() -> Config {
        Config::parse(
            r#"
editor = "vim"
[mappings]
username = "alice"
name = "overridden"
[abbreviations]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_substitutions_for_problem() {
        let vars = Substitutions::for_problem(&config(), &site(), "two-sum");
        assert_eq!(vars.get("username"), Some("alice"));
        assert_eq!(vars.get("name"), Some("UVa"));
        assert_eq!(vars.get("problem_name"), Some("two-sum"));
    }

    #[test]
    fn test_config_mappings_untouched() {
        let config = config();
        let _ = Substitutions::for_problem(&config, &site(), "two-sum");
        assert_eq!(config.mappings["name"], "overridden");
        assert!(!config.mappings.contains_key("problem_name"));
    }

    #[test]
    fn test_render_keeps_trailing_newline() {
        let vars = Substitutions::default().with("problem_name", "two-sum");
        let out = Renderer::new()
            .render("// {{ problem_name }}\nint main() {}\n", &vars)
            .unwrap();
        assert_eq!(out, "// two-sum\nint main() {}\n");
    }

    #[test]
    fn test_render_unknown_variable_is_empty() {
        let out = Renderer::new()
            .render("[{{ missing }}]", Substitutions::default())
            .unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_render_syntax_error() {
        assert!(Renderer::new()
            .render("{{ unclosed", Substitutions::default())
            .is_err());
    }

    #[test]
    fn test_toml_filter_escapes() {
        let vars = Substitutions::default().with("v", "say \"hi\"");
        let out = Renderer::new().render("x = {{ v|toml }}", &vars).unwrap();
        let parsed: toml::Table = toml::from_str(&out).unwrap();
        assert_eq!(parsed["x"].as_str(), Some("say \"hi\""));
    }

    #[test]
    fn test_split_plain_words() {
        assert_eq!(split_words("  vim   -p "), vec!["vim", "-p"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_split_keeps_tags_together() {
        assert_eq!(
            split_words("g++ -o {{ problem_path }} {{ problem_path }}.cpp"),
            vec!["g++", "-o", "{{ problem_path }}", "{{ problem_path }}.cpp"]
        );
        assert_eq!(
            split_words(r#"echo {{ "a b" }} {# note #}"#),
            vec!["echo", r#"{{ "a b" }}"#, "{# note #}"]
        );
    }

    #[test]
    fn test_split_then_render_keeps_spaces_in_values() {
        let vars = Substitutions::default().with("problem_path", "/tmp/my dir/two-sum");
        let renderer = Renderer::new();
        let words: Vec<String> = split_words("cat {{ problem_path }}.txt")
            .iter()
            .map(|w| renderer.render(w, &vars).unwrap())
            .collect();
        assert_eq!(words, vec!["cat", "/tmp/my dir/two-sum.txt"]);
    }

    #[test]
    fn test_split_quoted_words() {
        assert_eq!(
            split_words(r#""/opt/My Editor/edit" -w"#),
            vec!["/opt/My Editor/edit", "-w"]
        );
        assert_eq!(split_words("echo 'a  b'c"), vec!["echo", "a  bc"]);
        assert_eq!(split_words(r#"printf "" x"#), vec!["printf", "", "x"]);
        assert_eq!(split_words(r#"say "it's""#), vec!["say", "it's"]);
    }

    #[test]
    fn test_split_renders_tags_inside_quotes() {
        let vars = Substitutions::default().with("problem_path", "/tmp/two-sum");
        let words = split_words(r#"cp "{{ problem_path }} copy.txt" out"#);
        assert_eq!(words, vec!["{{ problem_path }} copy.txt", "out"]);
        assert_eq!(
            Renderer::new().render(&words[0], &vars).unwrap(),
            "/tmp/two-sum copy.txt"
        );
    }
}
