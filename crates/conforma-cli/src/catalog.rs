//! # Catalog Subcommand
//!
//! ## Subcommands
//!
//! - `laws` -- List laws and the themes linked to them.
//! - `themes` -- List themes, optionally only those under one law.
//! - `requirements` -- List requirement definitions, optionally for one theme.
//! - `add-law` -- Register a law from a link or a document file.
//! - `add-theme` -- Register a theme under zero or more laws.
//! - `add-requirement` -- Register a requirement definition under a theme.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use conforma_client::laws::LawForm;
use conforma_client::requirements::NewRequirementDefinition;
use conforma_client::themes::ThemeRequest;
use conforma_client::{ConformaClient, FileUpload};
use conforma_core::{Law, LawId, ThemeDefinition, ThemeId};

/// Arguments for the `conforma catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List laws.
    Laws,

    /// List themes.
    Themes {
        /// Only themes linked to this law.
        #[arg(long, conflicts_with = "unlinked")]
        law: Option<LawId>,
        /// Only themes linked to no law.
        #[arg(long)]
        unlinked: bool,
    },

    /// List requirement definitions.
    Requirements {
        /// Only requirements of this theme.
        #[arg(long)]
        theme: Option<ThemeId>,
    },

    /// Register a law.
    AddLaw {
        /// Law name.
        #[arg(long)]
        name: String,
        /// Link to the law text.
        #[arg(long, required_unless_present = "document")]
        link: Option<String>,
        /// Law document to upload.
        #[arg(long)]
        document: Option<PathBuf>,
        /// Theme to link. Repeatable.
        #[arg(long = "theme")]
        themes: Vec<ThemeId>,
    },

    /// Register a theme.
    AddTheme {
        /// Theme name.
        #[arg(long)]
        name: String,
        /// Law the theme answers to. Repeatable.
        #[arg(long = "law")]
        laws: Vec<LawId>,
    },

    /// Register a requirement definition.
    AddRequirement {
        /// Owning theme.
        #[arg(long)]
        theme: ThemeId,
        /// Requirement text.
        #[arg(long)]
        text: String,
    },
}

/// Execute the catalog subcommand.
pub async fn run_catalog(args: &CatalogArgs, client: &ConformaClient) -> Result<u8> {
    match &args.command {
        CatalogCommand::Laws => {
            let laws = client.laws().list().await?;
            for law in &laws {
                println!("{}", law_line(law));
            }
            Ok(0)
        }
        CatalogCommand::Themes { law, unlinked } => {
            let themes = match law {
                Some(law) => client.themes().by_law(law).await?,
                None if *unlinked => client.themes().without_law().await?,
                None => client.themes().list().await?,
            };
            for theme in &themes {
                println!("{}", theme_line(theme));
            }
            Ok(0)
        }
        CatalogCommand::Requirements { theme } => {
            let requirements = match theme {
                Some(theme) => client.requirements().by_theme(theme).await?,
                None => client.requirements().list().await?,
            };
            for req in &requirements {
                println!("{:>6}  [{}]  {}", req.id.as_str(), req.tema_id, req.descricao);
            }
            Ok(0)
        }
        CatalogCommand::AddLaw {
            name,
            link,
            document,
            themes,
        } => {
            let documento = match document {
                Some(path) => Some(read_upload(path).await?),
                None => None,
            };
            let form = LawForm {
                nome: name.clone(),
                link: link.clone(),
                documento,
                temas: themes.clone(),
            };
            let law = client.laws().create(form).await?;
            println!("Lei {} cadastrada: {}", law.id, law.nome);
            Ok(0)
        }
        CatalogCommand::AddTheme { name, laws } => {
            let req = ThemeRequest::new(name.as_str(), laws.clone())?;
            let theme = client.themes().create(&req).await?;
            println!("Tema {} cadastrado: {}", theme.id, theme.nome);
            Ok(0)
        }
        CatalogCommand::AddRequirement { theme, text } => {
            let req = NewRequirementDefinition::new(text.as_str(), theme.clone())?;
            let created = client.requirements().create(&req).await?;
            println!("Requisito {} cadastrado no tema {}", created.id, created.tema_id);
            Ok(0)
        }
    }
}

async fn read_upload(path: &Path) -> Result<FileUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "documento".to_string());
    Ok(FileUpload { file_name, bytes })
}

fn law_line(law: &Law) -> String {
    let source = law
        .link
        .as_deref()
        .filter(|l| !l.is_empty())
        .or(law.documento.as_deref())
        .unwrap_or("-");
    let themes: Vec<&str> = law.temas_detalhes.iter().map(|t| t.nome.as_str()).collect();
    if themes.is_empty() {
        format!("{:>6}  {}  <{}>", law.id.as_str(), law.nome, source)
    } else {
        format!(
            "{:>6}  {}  <{}>  temas: {}",
            law.id.as_str(),
            law.nome,
            source,
            themes.join(", ")
        )
    }
}

fn theme_line(theme: &ThemeDefinition) -> String {
    let laws: Vec<&str> = theme.leis.iter().map(|l| l.nome.as_str()).collect();
    if laws.is_empty() {
        format!("{:>6}  {}", theme.id.as_str(), theme.nome)
    } else {
        format!("{:>6}  {}  ({})", theme.id.as_str(), theme.nome, laws.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn law_line_prefers_link_and_lists_themes() {
        let law: Law = serde_json::from_value(serde_json::json!({
            "id": 3,
            "nome": "Lei 9.433/1997",
            "link": "https://www.planalto.gov.br/ccivil_03/leis/l9433.htm",
            "documento": "uploads/lei-9433.pdf",
            "temas": [1],
            "temasDetalhes": [{ "id": 1, "nome": "Recursos Hídricos" }]
        }))
        .unwrap();
        let line = law_line(&law);
        assert!(line.contains("<https://www.planalto.gov.br/ccivil_03/leis/l9433.htm>"));
        assert!(line.ends_with("temas: Recursos Hídricos"));
    }

    #[test]
    fn law_line_falls_back_to_document() {
        let law: Law = serde_json::from_value(serde_json::json!({
            "id": 4,
            "nome": "Resolução CONAMA 430",
            "link": "",
            "documento": "uploads/conama-430.pdf"
        }))
        .unwrap();
        assert!(law_line(&law).contains("<uploads/conama-430.pdf>"));
    }

    #[tokio::test]
    async fn upload_keeps_the_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outorga.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let upload = read_upload(&path).await.unwrap();
        assert_eq!(upload.file_name, "outorga.pdf");
        assert_eq!(upload.bytes, b"%PDF-1.4");
    }
}
