//! The fixed table of README sections.
//!
//! Every section the composer knows about is declared exactly once in
//! [`SECTIONS`]. The table order is the order sections appear in the
//! composed document, and [`SectionId`] discriminants index into it.

use std::fmt;
use std::str::FromStr;

/// Number of sections in [`SECTIONS`].
pub const SECTION_COUNT: usize = 11;

/// Identifier of a README section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    About,
    BuiltWith,
    GettingStarted,
    Prerequisites,
    Installation,
    Usage,
    Roadmap,
    Contributions,
    License,
    Contact,
    Acknowledgements,
}

/// Static description of a section: key, heading and seed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: SectionId,
    /// Stable key used on the command line and in config files.
    pub key: &'static str,
    /// Heading title, also used as the form label.
    pub title: &'static str,
    /// Markdown heading level (2 or 3).
    pub level: u8,
    /// Text the section starts with.
    pub seed: &'static str,
}

impl SectionSpec {
    /// The Markdown heading line, e.g. `## About`.
    pub fn heading(&self) -> String {
        format!("{} {}", "#".repeat(usize::from(self.level)), self.title)
    }

    /// Whether this section is nested under the previous level-2 heading.
    pub const fn is_nested(&self) -> bool {
        self.level > 2
    }
}

/// All sections, in document order.
pub static SECTIONS: [SectionSpec; SECTION_COUNT] = [
    SectionSpec {
        id: SectionId::About,
        key: "about",
        title: "About",
        level: 2,
        seed: "This is a quick ReadMe.md file generator for Github projects",
    },
    SectionSpec {
        id: SectionId::BuiltWith,
        key: "built-with",
        title: "Built With",
        level: 2,
        seed: concat!(
            "* ![Next JS](https://img.shields.io/badge/Next-black?style=for-the-badge&logo=next.js&logoColor=white) \n\n ",
            "* ![React](https://img.shields.io/badge/react-%2320232a.svg?style=for-the-badge&logo=react&logoColor=%2361DAFB) \n\n",
            "* ![TailwindCSS](https://img.shields.io/badge/tailwindcss-%2338B2AC.svg?style=for-the-badge&logo=tailwind-css&logoColor=white)",
        ),
    },
    SectionSpec {
        id: SectionId::GettingStarted,
        key: "getting-started",
        title: "Getting Started",
        level: 2,
        seed: "To get a local copy up and running follow these simple example steps.",
    },
    SectionSpec {
        id: SectionId::Prerequisites,
        key: "prerequisites",
        title: "Prerequisites",
        level: 3,
        seed: concat!(
            "* node (v18.17.0+) \n",
            "Download lastest [Node.Js](https://nodejs.org/en/download/package-manager) \n\n",
            "* npm (9.6.7+) \n",
            "```sh \n",
            "npm install npm@latest -g \n",
            "```",
        ),
    },
    SectionSpec {
        id: SectionId::Installation,
        key: "installation",
        title: "Installation",
        level: 3,
        seed: concat!(
            "Below is an example of how you can instruct your audience on installing and setting up your app. ",
            "This template doesn't rely on any external dependencies or services. \n\n ",
            "Clone the repo \n\n",
            "```sh \n ",
            "git clone https://github.com/your_username_/Project-Name.git \n ",
            " ``` \n ",
            "Install NPM packages \n ",
            "```sh \n ",
            "npm install \n ",
            "```",
        ),
    },
    SectionSpec {
        id: SectionId::Usage,
        key: "usage",
        title: "Usage",
        level: 2,
        seed: "To use either copy or download the markdown and add it to your main github repository folder.",
    },
    SectionSpec {
        id: SectionId::Roadmap,
        key: "roadmap",
        title: "Roadmap",
        level: 2,
        seed: concat!(
            "- [x] Initalize Repository \n",
            "- [ ] Add Changelog \n",
            "- [ ] Add dynamically created sections \n",
            "- [ ] Refactor code \n",
        ),
    },
    SectionSpec {
        id: SectionId::Contributions,
        key: "contributions",
        title: "Contributions",
        level: 2,
        seed: "If you have a suggestion that would make this better, please fork the repo and create a pull request. ",
    },
    SectionSpec {
        id: SectionId::License,
        key: "license",
        title: "License",
        level: 2,
        seed: "Distributed under the MIT License.",
    },
    SectionSpec {
        id: SectionId::Contact,
        key: "contact",
        title: "Contact",
        level: 2,
        seed: concat!(
            "Your Name - email@example.com \n\n",
            "Project Link: [https://github.com/your_username/repo_name](https://github.com/your_username/repo_name)",
        ),
    },
    SectionSpec {
        id: SectionId::Acknowledgements,
        key: "acknowledgements",
        title: "Acknowledgements",
        level: 2,
        seed: concat!(
            "* [Choose an Open Source License](https://choosealicense.com) \n ",
            "* [Markdown Inspiration](https://github.com/othneildrew/Best-README-Template/blob/master/README.md) \n ",
            "* [Markdown Badges](https://github.com/Ileriayo/markdown-badges)",
        ),
    },
];

/// Errors raised when a section is named by string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("unknown section `{0}` (try --list-sections)")]
    Unknown(String),
    #[error("expected SECTION=TEXT, got `{0}`")]
    MalformedAssignment(String),
}

impl SectionId {
    /// Position of this section in [`SECTIONS`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The static description of this section.
    pub fn spec(self) -> &'static SectionSpec {
        &SECTIONS[self.index()]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    /// Look up a section by key.
    ///
    /// Matching ignores case and treats spaces and underscores as `-`, so
    /// `"Built With"`, `"built_with"` and `"built-with"` are the same section.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::Unknown`] when no section has that key.
    pub fn from_key(key: &str) -> Result<Self, SectionError> {
        let normalized: String = key
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        SECTIONS
            .iter()
            .find(|spec| spec.key == normalized)
            .map(|spec| spec.id)
            .ok_or_else(|| SectionError::Unknown(key.to_string()))
    }

    /// The section after this one, wrapping around.
    pub fn next(self) -> Self {
        SECTIONS[(self.index() + 1) % SECTION_COUNT].id
    }

    /// The section before this one, wrapping around.
    pub fn prev(self) -> Self {
        SECTIONS[(self.index() + SECTION_COUNT - 1) % SECTION_COUNT].id
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SectionId {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// A `SECTION=TEXT` pair from the command line.
///
/// The two-character sequence `\n` in TEXT is read as a newline so multi-line
/// sections can be seeded from a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAssignment {
    pub id: SectionId,
    pub text: String,
}

impl FromStr for SectionAssignment {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, text) = s
            .split_once('=')
            .ok_or_else(|| SectionError::MalformedAssignment(s.to_string()))?;
        Ok(Self {
            id: SectionId::from_key(key)?,
            text: text.replace("\\n", "\n"),
        })
    }
}
