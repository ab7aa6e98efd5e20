//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub url: String,
    pub site_id: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    /// Questions answered on the home page (visible section and FAQPage data)
    pub home_faq: Vec<FaqEntry>,

    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub signup: SignupConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "SecondLook".to_string(),
            tagline: "What to do when 5 doctors can't diagnose you".to_string(),
            description: "AI-powered diagnostic guidance for complex medical cases that traditional healthcare has failed to solve.".to_string(),
            keywords: vec![
                "diagnostic odyssey support".to_string(),
                "complex symptom pattern recognition".to_string(),
                "organize medical records difficult diagnosis".to_string(),
            ],
            url: "https://secondlook.ai".to_string(),
            site_id: "secondlook".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            home_faq: default_home_faq(),

            blog: BlogConfig::default(),
            server: ServerConfig::default(),
            signup: SignupConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(site_id) = non_empty("SITE_ID") {
            self.site_id = site_id;
        }

        let url = non_empty("UPSTASH_REDIS_REST_URL");
        let token = non_empty("UPSTASH_REDIS_REST_TOKEN");
        if let (Some(url), Some(token)) = (url, token) {
            tracing::debug!("Using Upstash signup store from environment");
            self.signup.upstash_url = Some(url);
            self.signup.upstash_token = Some(token);
            self.signup.store = StoreKind::Upstash;
        }
    }

    /// Site URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// One question and its answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }
}

fn default_home_faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "What to do if doctors can't diagnose you?",
            "When multiple doctors can't diagnose you, it's time to take a more systematic approach. Organize all your medical records, test results, and symptom timelines in one place. Consider seeking a second opinion at a major medical center that specializes in rare diseases, and prepare strategically for each appointment with targeted questions and comprehensive documentation.",
        ),
        FaqEntry::new(
            "Where to go when no one can diagnose you?",
            "Consider major medical centers like Mayo Clinic, Cleveland Clinic, or Johns Hopkins that have specialized rare disease programs. University hospitals often have research programs for undiagnosed conditions. Additionally, organizing your medical data with AI-powered tools can help identify patterns that individual doctors might miss.",
        ),
        FaqEntry::new(
            "What is the hardest medical condition to diagnose?",
            "Rare diseases, autoimmune conditions, and complex multi-system disorders are among the hardest to diagnose. Conditions like fibromyalgia, chronic fatigue syndrome, and many genetic disorders can take years to identify because they present with overlapping symptoms that mimic more common conditions.",
        ),
        FaqEntry::new(
            "How to organize medical records for difficult diagnosis?",
            "Create a comprehensive timeline of symptoms, treatments, and test results. Organize records by specialist and date, compile all imaging and lab results in one folder, and maintain a detailed symptom diary. Use digital tools to track patterns over time and prepare summary documents for new healthcare providers.",
        ),
    ]
}

/// Blog index page copy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub heading: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            heading: "Diagnostic Support Blog".to_string(),
            title: "Diagnostic Support Blog — Tips & Guides".to_string(),
            description: "Expert guidance on navigating complex medical diagnoses, organizing medical records, and advocating for yourself when doctors can't find answers.".to_string(),
            keywords: vec![
                "diagnostic odyssey support".to_string(),
                "medical self advocacy".to_string(),
                "complex diagnosis tips".to_string(),
                "medical record organization".to_string(),
            ],
        }
    }
}

/// Local server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Which append-log backend receives signups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    File,
    Upstash,
}

/// Email signup storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    pub store: StoreKind,
    pub file_dir: String,
    pub upstash_url: Option<String>,
    pub upstash_token: Option<String>,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::File,
            file_dir: ".signups".to_string(),
            upstash_url: None,
            upstash_token: None,
        }
    }
}
