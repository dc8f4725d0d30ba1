//! Listing enrichment: plain-text descriptions and detected technologies.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Canonical technology name and the spellings that identify it.
///
/// A spelling listed under several technologies belongs to the last one
/// (`postgres` is PostgreSQL, not SQL; `swift` is Mobile).
#[rustfmt::skip]
const TECH_MAPPING: &[(&str, &[&str])] = &[
    ("JavaScript", &["javascript", "js", "es6", "es2015", "ecmascript", "vanilla js", "vanilla javascript"]),
    ("TypeScript", &["typescript", "ts"]),
    ("Python", &["python", "python2", "python3", "py"]),
    ("Java", &["java", "java8", "java11", "java17", "j2ee"]),
    ("C#", &["c#", "csharp", ".net", "dotnet", "asp.net"]),
    ("C++", &["c++", "cpp"]),
    ("PHP", &["php", "php7", "php8", "laravel", "symfony"]),
    ("Ruby", &["ruby", "rails", "ruby on rails", "ror"]),
    ("Go", &["go", "golang"]),
    ("Rust", &["rust", "rustlang"]),
    ("Swift", &["swift", "swiftui"]),
    ("Kotlin", &["kotlin"]),
    ("React", &["react", "reactjs", "react.js", "react native"]),
    ("Angular", &["angular", "angularjs", "angular.js"]),
    ("Vue", &["vue", "vuejs", "vue.js", "vuex"]),
    ("Node.js", &["node", "nodejs", "node.js", "express", "expressjs", "express.js"]),
    ("Django", &["django"]),
    ("Flask", &["flask"]),
    ("Spring", &["spring", "spring boot", "springboot"]),
    ("jQuery", &["jquery"]),
    ("Redux", &["redux"]),
    ("GraphQL", &["graphql", "apollo", "relay"]),
    ("SQL", &["sql", "mysql", "postgresql", "postgres", "sqlite", "mariadb", "oracle"]),
    ("MongoDB", &["mongodb", "mongo", "nosql"]),
    ("Firebase", &["firebase", "firestore"]),
    ("Redis", &["redis"]),
    ("PostgreSQL", &["postgresql", "postgres"]),
    ("MySQL", &["mysql"]),
    ("AWS", &["aws", "amazon web services", "ec2", "s3", "lambda"]),
    ("Docker", &["docker", "container", "containerization"]),
    ("Kubernetes", &["kubernetes", "k8s"]),
    ("Git", &["git", "github", "gitlab", "bitbucket"]),
    ("CI/CD", &["ci/cd", "ci", "cd", "continuous integration", "continuous deployment", "jenkins", "github actions"]),
    ("Machine Learning", &["machine learning", "ml", "ai", "artificial intelligence", "tensorflow", "pytorch", "keras"]),
    ("Data Science", &["data science", "data scientist", "data analysis", "pandas", "numpy", "matplotlib", "scikit-learn"]),
    ("Blockchain", &["blockchain", "bitcoin", "ethereum", "solidity", "web3", "web3.js"]),
    ("Mobile", &["mobile", "ios", "android", "swift", "kotlin", "react native", "flutter"]),
    ("Frontend", &["frontend", "front-end", "html", "css", "scss", "sass", "less", "bootstrap", "tailwind"]),
    ("Backend", &["backend", "back-end", "server-side"]),
    ("Fullstack", &["fullstack", "full-stack", "full stack", "frontend", "backend"]),
];

struct Spelling {
    tech: &'static str,
    pattern: Regex,
}

/// Spellings in first-seen order, each bound to its final technology.
static SPELLINGS: Lazy<Vec<Spelling>> = Lazy::new(|| {
    let mut order: Vec<&'static str> = Vec::new();
    let mut owner: HashMap<&'static str, &'static str> = HashMap::new();
    for &(tech, spellings) in TECH_MAPPING {
        for spelling in spellings.iter().copied() {
            if owner.insert(spelling, tech).is_none() {
                order.push(spelling);
            }
        }
    }

    order
        .into_iter()
        .map(|spelling| Spelling {
            tech: owner[&spelling],
            // Spellings such as "c++" or ".net" end in non-word characters, so
            // the match is bounded by non-word characters rather than `\b`.
            pattern: Regex::new(&format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(spelling)))
                .expect("escaped literal is a valid pattern"),
        })
        .collect()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Technologies mentioned in `text`, deduplicated, in table order of the
/// first matching spelling.
pub fn tech_stack(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut found: Vec<String> = Vec::new();
    for spelling in SPELLINGS.iter() {
        if spelling.pattern.is_match(text) && !found.iter().any(|t| t == spelling.tech) {
            found.push(spelling.tech.to_string());
        }
    }
    found
}

/// Drop markup, decode the common entities and collapse whitespace.
pub fn strip_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = TAG
        .replace_all(html, " ")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_removes_tags_and_decodes_entities() {
        assert_eq!(
            strip_html("<p>Rust&nbsp;&amp; Tokio</p>\n<ul><li>&lt;fast&gt;</li><li>&quot;safe&quot; &#39;n&#39; sound</li></ul>"),
            "Rust & Tokio <fast> \"safe\" 'n' sound"
        );
        assert_eq!(strip_html(""), "");
        assert_eq!(strip_html("   <br/>  "), "");
    }

    #[test]
    fn strip_html_keeps_plain_text() {
        assert_eq!(strip_html("already plain"), "already plain");
        assert_eq!(strip_html("a\t\tb\n\nc"), "a b c");
    }

    #[test]
    fn tech_stack_maps_spellings_to_canonical_names() {
        let stack = tech_stack("Senior Rust engineer: tokio, Postgres, Docker and k8s on AWS");
        assert_eq!(stack, vec!["Rust", "PostgreSQL", "AWS", "Docker", "Kubernetes"]);
    }

    #[test]
    fn tech_stack_is_case_insensitive_and_deduplicated() {
        let stack = tech_stack("PYTHON developer, python3, Django");
        assert_eq!(stack, vec!["Python", "Django"]);
    }

    #[test]
    fn tech_stack_matches_whole_words_only() {
        assert!(tech_stack("trusted gopher").is_empty());
        assert_eq!(tech_stack("C++ and .NET"), vec!["C#", "C++"]);
    }

    #[test]
    fn later_mapping_owns_shared_spellings() {
        assert_eq!(tech_stack("Swift"), vec!["Mobile"]);
        assert_eq!(tech_stack("backend"), vec!["Fullstack"]);
    }

    #[test]
    fn tech_stack_of_blank_text_is_empty() {
        assert!(tech_stack("").is_empty());
        assert!(tech_stack("   ").is_empty());
    }
}
