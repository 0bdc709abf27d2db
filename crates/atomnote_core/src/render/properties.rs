//! Human-oriented property tables appended below the note body.
//!
//! # Responsibility
//! - Render the general callout (identification, connections,
//!   classification, temporal) and the SaaS callout.
//!
//! # Invariants
//! - Column headers and row labels are identical for every note.
//! - Values come from the same `NoteRecord`/`GenerationConfig` fields as the
//!   front matter, so the two views cannot disagree.

use crate::model::config::GenerationConfig;
use crate::model::note::NoteRecord;
use crate::render::link::{join_links, wiki_link};
use crate::render::template::{Slots, Template, TemplateError};
use once_cell::sync::Lazy;

/// Separator used for joined related titles and tags.
pub const LIST_SEPARATOR: &str = ", ";

static GENERAL_PROPERTIES: Lazy<Template> = Lazy::new(|| {
    Template::new(
        r#"> [!note]- Propriedades Gerais do Obsidian
>
>> **Identificacao**
>
> | Campo      | Valor                    |
> |:-----------|:-------------------------|
> | **Titulo** | {title} |
>
>> **Conexoes**
>
> | Campo           | Valor                                                                 |
> |:----------------|:----------------------------------------------------------------------|
> | **Pai**         | {parent_link} |
> | **Colecao**     | {collection} |
> | **Relacionado** | {related} |
>
>> **Classificacao**
>
> | Campo      | Valor                                                                 |
> |:-----------|:----------------------------------------------------------------------|
> | **Tipo**   | Atomica |
> | **Tags**   | {tags} |
> | **Status** | Concluido |
>
>> **Temporal**
>
> | Campo          | Valor                      |
> |:---------------|:---------------------------|
> | **Criado**     | {created_at}       |
> | **Atualizado** | {updated_at}   |"#,
    )
});

static SAAS_PROPERTIES: Lazy<Template> = Lazy::new(|| {
    Template::new(
        r#"> [!note]- Propriedades SaaS
>
> | Campo             | Valor                                                              |
> |:------------------|:-------------------------------------------------------------------|
> | **Mostrar Bloco** | {show_saas_block} |
> | **Status SaaS**   | {saas_status}        |"#,
    )
});

/// Both rendered callouts, each without a trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTables {
    pub general: String,
    pub saas: String,
}

pub fn render_property_tables(
    note: &NoteRecord,
    config: &GenerationConfig,
) -> Result<PropertyTables, TemplateError> {
    let mut slots = Slots::new();
    slots
        .set("title", note.title.as_str())
        .set("parent_link", wiki_link(&config.parent_title))
        .set("collection", note.collection.to_uppercase())
        .set("related", join_links(note.related.as_slice(), LIST_SEPARATOR))
        .set("tags", note.tags.join(LIST_SEPARATOR))
        .set("created_at", config.created_at_text())
        .set("updated_at", config.updated_at_text())
        .set("show_saas_block", config.show_saas_block.to_string())
        .set("saas_status", config.saas_status.to_string());

    Ok(PropertyTables {
        general: GENERAL_PROPERTIES.render(&slots)?,
        saas: SAAS_PROPERTIES.render(&slots)?,
    })
}

#[cfg(test)]
mod tests {
    use super::render_property_tables;
    use crate::model::config::GenerationConfig;
    use crate::model::note::NoteRecord;
    use chrono::NaiveDate;

    fn config() -> GenerationConfig {
        let mut config = GenerationConfig::new(
            "Parent Note",
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        );
        config.updated_at = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        config.saas_status = true;
        config
    }

    #[test]
    fn connections_row_uppercases_collection_and_joins_links() {
        let note = NoteRecord::new("Bun", "tecnologia").with_related(["TypeScript", "Bun Test"]);
        let tables = render_property_tables(&note, &config()).unwrap();
        assert!(tables.general.contains("> | **Colecao**     | TECNOLOGIA |\n"));
        assert!(tables
            .general
            .contains("> | **Relacionado** | [[TypeScript]], [[Bun Test]] |\n"));
        assert!(tables.general.contains("> | **Pai**         | [[Parent Note]] |\n"));
    }

    #[test]
    fn classification_and_temporal_rows_use_batch_values() {
        let note = NoteRecord::new("Bun", "tecnologia").with_tags(["runtime", "javascript"]);
        let tables = render_property_tables(&note, &config()).unwrap();
        assert!(tables.general.contains("> | **Tags**   | runtime, javascript |\n"));
        assert!(tables.general.contains("> | **Criado**     | 2025-01-03       |\n"));
        assert!(tables.general.ends_with("> | **Atualizado** | 2025-02-01   |"));
    }

    #[test]
    fn saas_callout_prints_both_flags() {
        let note = NoteRecord::new("Bun", "tecnologia");
        let tables = render_property_tables(&note, &config()).unwrap();
        assert!(tables.saas.starts_with("> [!note]- Propriedades SaaS\n"));
        assert!(tables.saas.contains("> | **Mostrar Bloco** | false |\n"));
        assert!(tables.saas.ends_with("> | **Status SaaS**   | true        |"));
    }

    #[test]
    fn empty_lists_leave_value_cells_blank() {
        let note = NoteRecord::new("Bun", "tecnologia");
        let tables = render_property_tables(&note, &config()).unwrap();
        assert!(tables.general.contains("> | **Relacionado** |  |\n"));
        assert!(tables.general.contains("> | **Tags**   |  |\n"));
    }
}
