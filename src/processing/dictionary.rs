//! Skill and job-title dictionaries
//!
//! Both dictionaries map a canonical name to the surface forms that count as
//! a mention of it. They are built once and shared read-only by the extractors.

use crate::processing::normalizer::TextNormalizer;
use std::collections::{BTreeMap, BTreeSet};

type SkillTable = &'static [(&'static str, &'static [(&'static str, &'static [&'static str])])];
type TitleTable = &'static [(&'static str, &'static [&'static str])];

/// Category used for skills merged in from configuration
pub const CUSTOM_CATEGORY: &str = "custom";

const BUILTIN_SKILLS: SkillTable = &[
    ("programming", &[
        ("python", &["python", "python3", "django", "flask", "pandas", "numpy"]),
        ("java", &["java", "spring", "spring boot", "j2ee", "java ee"]),
        ("javascript", &["javascript", "js", "es6", "node", "node.js", "react", "angular", "vue", "express", "typescript"]),
        ("c++", &["c++", "cpp", "c plus plus"]),
        ("c#", &["c#", "c sharp", "dotnet", ".net", "asp.net"]),
        ("php", &["php", "laravel", "symfony", "wordpress"]),
        ("ruby", &["ruby", "rails", "ruby on rails"]),
        ("swift", &["swift", "ios", "swiftui"]),
        ("kotlin", &["kotlin", "android"]),
        ("go", &["go", "golang"]),
        ("rust", &["rust"]),
        ("typescript", &["typescript", "ts"]),
        ("html", &["html", "html5"]),
        ("css", &["css", "css3", "sass", "scss", "less"]),
        ("sql", &["sql", "mysql", "postgresql", "oracle", "sql server"]),
        ("r", &["r", "r language", "r programming"]),
        ("matlab", &["matlab"]),
        ("perl", &["perl"]),
        ("scala", &["scala"]),
    ]),
    ("frameworks", &[
        ("react", &["react", "react.js", "reactjs"]),
        ("angular", &["angular", "angular.js", "angularjs"]),
        ("vue", &["vue", "vue.js", "vuejs"]),
        ("django", &["django"]),
        ("flask", &["flask"]),
        ("spring", &["spring", "spring boot", "spring framework"]),
        ("laravel", &["laravel"]),
        ("express", &["express", "express.js"]),
        ("rails", &["rails", "ruby on rails"]),
        ("asp.net", &["asp.net", "asp net"]),
        ("tensorflow", &["tensorflow", "tensor flow"]),
        ("pytorch", &["pytorch", "py torch"]),
        ("keras", &["keras"]),
        ("node.js", &["node", "node.js", "nodejs"]),
        ("jquery", &["jquery"]),
        ("bootstrap", &["bootstrap"]),
    ]),
    ("databases", &[
        ("mysql", &["mysql"]),
        ("postgresql", &["postgresql", "postgres"]),
        ("mongodb", &["mongodb", "mongo"]),
        ("redis", &["redis"]),
        ("oracle", &["oracle", "oracle db"]),
        ("sqlite", &["sqlite"]),
        ("cassandra", &["cassandra"]),
        ("dynamodb", &["dynamodb", "dynamo db"]),
    ]),
    ("tools", &[
        ("git", &["git", "github", "gitlab"]),
        ("docker", &["docker"]),
        ("kubernetes", &["kubernetes", "k8s"]),
        ("jenkins", &["jenkins"]),
        ("aws", &["aws", "amazon web services"]),
        ("azure", &["azure", "microsoft azure"]),
        ("gcp", &["gcp", "google cloud", "google cloud platform"]),
        ("linux", &["linux", "ubuntu", "centos", "debian"]),
        ("unix", &["unix"]),
        ("ansible", &["ansible"]),
        ("terraform", &["terraform"]),
        ("selenium", &["selenium"]),
        ("jira", &["jira"]),
        ("confluence", &["confluence"]),
    ]),
    ("cloud", &[
        ("aws", &["aws", "amazon web services", "ec2", "s3", "lambda"]),
        ("azure", &["azure", "microsoft azure", "azure functions"]),
        ("gcp", &["gcp", "google cloud", "google cloud platform"]),
        ("cloud computing", &["cloud", "cloud computing"]),
    ]),
    ("methodologies", &[
        ("agile", &["agile", "scrum", "kanban"]),
        ("devops", &["devops", "ci/cd", "continuous integration"]),
        ("microservices", &["microservices", "microservice architecture"]),
        ("rest", &["rest", "restful", "api"]),
        ("graphql", &["graphql"]),
        ("tdd", &["tdd", "test driven development"]),
    ]),
    ("soft_skills", &[
        ("communication", &["communication", "communicate", "communicating"]),
        ("leadership", &["leadership", "leader", "leading"]),
        ("teamwork", &["teamwork", "team work", "collaboration", "collaborate"]),
        ("problem solving", &["problem solving", "problem solver", "solve problems"]),
        ("creativity", &["creativity", "creative", "innovative"]),
        ("adaptability", &["adaptability", "adaptable", "flexible"]),
        ("time management", &["time management", "manage time"]),
        ("critical thinking", &["critical thinking", "analytical thinking"]),
        ("collaboration", &["collaboration", "collaborate"]),
    ]),
];

const BUILTIN_TITLES: TitleTable = &[
    ("software engineer", &["software engineer", "software developer", "backend developer", "fullstack developer"]),
    ("data scientist", &["data scientist", "ml engineer", "ai engineer", "machine learning engineer"]),
    ("devops engineer", &["devops engineer", "site reliability engineer", "sre"]),
    ("frontend developer", &["frontend developer", "front end developer", "ui developer"]),
    ("backend developer", &["backend developer", "back end developer"]),
    ("fullstack developer", &["fullstack developer", "full stack developer"]),
    ("mobile developer", &["mobile developer", "ios developer", "android developer"]),
    ("data engineer", &["data engineer"]),
    ("cloud engineer", &["cloud engineer", "aws engineer", "azure engineer"]),
    ("qa engineer", &["qa engineer", "quality assurance", "test engineer"]),
];

/// A canonical name together with its surface forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub canonical: String,
    pub variants: Vec<String>,
}

impl DictionaryEntry {
    pub fn new(canonical: impl Into<String>, variants: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            canonical: canonical.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<DictionaryEntry>,
}

/// Category → canonical skill → surface forms
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    categories: Vec<SkillCategory>,
}

/// Canonical title → surface forms
#[derive(Debug, Clone)]
pub struct TitleDictionary {
    titles: Vec<DictionaryEntry>,
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkillDictionary {
    pub fn builtin() -> Self {
        let categories = BUILTIN_SKILLS
            .iter()
            .map(|(name, skills)| SkillCategory {
                name: name.to_string(),
                skills: skills
                    .iter()
                    .map(|(canonical, variants)| DictionaryEntry::new(*canonical, variants.iter().copied()))
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// Merge extra skills into the `custom` category. Variants go through the
    /// same normalizer as the scanned text and blank ones are dropped; a skill
    /// with no usable variant matches its own normalized name.
    pub fn with_custom_skills(mut self, custom: &BTreeMap<String, Vec<String>>) -> Self {
        if custom.is_empty() {
            return self;
        }

        let normalizer = TextNormalizer::new();
        let skills = custom
            .iter()
            .filter_map(|(name, variants)| {
                let canonical = name.trim().to_lowercase();
                let mut forms: Vec<String> = Vec::new();
                for form in variants.iter().map(|v| normalizer.normalize(v)) {
                    if !form.is_empty() && !forms.contains(&form) {
                        forms.push(form);
                    }
                }
                if forms.is_empty() {
                    let own = normalizer.normalize(&canonical);
                    if own.is_empty() {
                        return None;
                    }
                    forms.push(own);
                }
                Some(DictionaryEntry::new(canonical, forms))
            })
            .collect();

        self.categories.push(SkillCategory {
            name: CUSTOM_CATEGORY.to_string(),
            skills,
        });
        self
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Every entry across all categories, in category order
    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.categories.iter().flat_map(|c| c.skills.iter())
    }

    /// Union of canonical names across categories
    pub fn vocabulary(&self) -> BTreeSet<String> {
        self.entries().map(|e| e.canonical.clone()).collect()
    }

    pub fn skill_count(&self) -> usize {
        self.vocabulary().len()
    }
}

impl Default for TitleDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TitleDictionary {
    pub fn builtin() -> Self {
        let titles = BUILTIN_TITLES
            .iter()
            .map(|(canonical, variants)| DictionaryEntry::new(*canonical, variants.iter().copied()))
            .collect();

        Self { titles }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.titles.iter()
    }

    pub fn vocabulary(&self) -> BTreeSet<String> {
        self.titles.iter().map(|e| e.canonical.clone()).collect()
    }

    pub fn title_count(&self) -> usize {
        self.titles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_surface_forms_are_nonempty_lowercase() {
        let skills = SkillDictionary::builtin();
        let titles = TitleDictionary::builtin();

        for entry in skills.entries().chain(titles.entries()) {
            assert!(!entry.variants.is_empty(), "{} has no variants", entry.canonical);
            for variant in &entry.variants {
                assert!(!variant.is_empty());
                assert_eq!(variant, &variant.to_lowercase());
            }
        }
    }

    #[test]
    fn test_canonical_names_unique_within_category() {
        let skills = SkillDictionary::builtin();

        for category in skills.categories() {
            let names: BTreeSet<&str> = category.skills.iter().map(|s| s.canonical.as_str()).collect();
            assert_eq!(names.len(), category.skills.len(), "duplicate in {}", category.name);
        }
    }

    #[test]
    fn test_vocabulary_unions_across_categories() {
        let skills = SkillDictionary::builtin();
        let vocabulary = skills.vocabulary();

        // "aws" lives under both tools and cloud but is one vocabulary entry
        let aws_entries = skills.entries().filter(|e| e.canonical == "aws").count();
        assert_eq!(aws_entries, 2);
        assert!(vocabulary.contains("aws"));
        assert_eq!(skills.skill_count(), vocabulary.len());
    }

    #[test]
    fn test_custom_skills_are_merged() {
        let mut custom = BTreeMap::new();
        custom.insert("Elixir".to_string(), vec!["Elixir".to_string(), "Phoenix".to_string()]);
        custom.insert("zig".to_string(), vec!["  ".to_string()]);

        let skills = SkillDictionary::builtin().with_custom_skills(&custom);
        let category = skills.categories().last().unwrap();

        assert_eq!(category.name, CUSTOM_CATEGORY);
        assert_eq!(category.skills[0], DictionaryEntry::new("elixir", ["elixir", "phoenix"]));
        assert_eq!(category.skills[1], DictionaryEntry::new("zig", ["zig"]));
    }

    #[test]
    fn test_custom_variants_are_normalized() {
        let mut custom = BTreeMap::new();
        custom.insert("f#".to_string(), vec!["F#".to_string()]);
        custom.insert("node js".to_string(), vec!["Node  JS".to_string(), "node js".to_string()]);
        custom.insert("###".to_string(), Vec::new());

        let skills = SkillDictionary::builtin().with_custom_skills(&custom);
        let category = skills.categories().last().unwrap();

        assert_eq!(category.skills.len(), 2);
        assert_eq!(category.skills[0], DictionaryEntry::new("f#", ["f"]));
        assert_eq!(category.skills[1], DictionaryEntry::new("node js", ["node js"]));
    }

    #[test]
    fn test_title_dictionary() {
        let titles = TitleDictionary::builtin();
        assert_eq!(titles.title_count(), 10);
        assert!(titles.vocabulary().contains("qa engineer"));
    }
}
