use dialoguer::{theme::ColorfulTheme, Select};
use isbnscan::{
    session::{Choice, Notice, Presenter},
    BookRecord, Error, ErrorKind,
};
use log::{trace, warn};

const UNKNOWN: &str = "Unknown";
const NONE: &str = "None";

/// Renders results to stdout and asks what to do next with a [`Select`] prompt.
pub struct Terminal {
    batch: bool,
    quiet: bool,
}

impl Terminal {
    pub const fn new(batch: bool, quiet: bool) -> Self {
        Self { batch, quiet }
    }
}

impl Presenter for Terminal {
    fn show_record(&mut self, record: &BookRecord) {
        if !self.quiet {
            println!("{}", render(record));
        }
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Duplicate(_) | Notice::NotFound(_) => warn!("{notice}"),
            // the cause has already been logged as an error
            Notice::LookupFailed(_) => trace!("{notice}"),
        }
        if !self.quiet {
            println!("{notice}");
        }
    }

    fn choose(&mut self) -> Result<Choice, Error> {
        if self.batch {
            return Ok(Choice::Continue);
        }

        let selection = user_select("Scan another book?", &["Continue", "Finish and save"])?;
        Ok(if selection == 0 {
            Choice::Continue
        } else {
            Choice::Finalize
        })
    }

    fn clear(&mut self) {
        if !self.quiet {
            println!();
        }
    }
}

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<usize, Error> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .map_err(|e| Error::wrap(ErrorKind::Interact, e))?;

    selection.ok_or_else(|| Error::new(ErrorKind::Interact, "No selection made - cancelling"))
}

fn render(record: &BookRecord) -> String {
    let or = |value: Option<&str>, missing: &'static str| value.unwrap_or(missing).to_owned();

    let mut lines = vec![
        format!("ISBN:           {}", record.isbn()),
        format!("Title:          {}", or(record.title.as_deref(), UNKNOWN)),
        format!("Authors:        {}", or(record.authors.as_deref(), UNKNOWN)),
        format!("Publisher:      {}", or(record.publisher.as_deref(), UNKNOWN)),
        format!(
            "Published:      {}",
            or(record.published_date.as_deref(), UNKNOWN)
        ),
        format!(
            "Description:    {}",
            or(record.description.as_deref(), NONE)
        ),
        format!(
            "Pages:          {}",
            record
                .page_count
                .map_or_else(|| UNKNOWN.to_owned(), |n| n.to_string())
        ),
        format!("Categories:     {}", or(record.categories.as_deref(), NONE)),
        format!("Language:       {}", or(record.language.as_deref(), UNKNOWN)),
    ];

    if let Some(link) = record.link() {
        lines.push(format!("Link:           {link}"));
    }
    if let Some(cover) = record.cover() {
        lines.push(format!("Cover:          {cover}"));
    }
    lines.push(format!("Source:         {}", record.provider()));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::render;
    use isbnscan::{BookRecord, Provider};

    #[test]
    fn render_fills_in_missing_fields() {
        let mut record = BookRecord::new("9780441013593", Provider::GoogleBooks);
        record.title = Some("Dune".to_owned());
        record.page_count = Some(896);

        let text = render(&record);

        assert!(text.contains("ISBN:           9780441013593"));
        assert!(text.contains("Title:          Dune"));
        assert!(text.contains("Authors:        Unknown"));
        assert!(text.contains("Description:    None"));
        assert!(text.contains("Pages:          896"));
        assert!(!text.contains("Link:"));
        assert!(text.ends_with("Source:         Google Books"));
    }

    #[test]
    fn render_prefers_preview_link() {
        let mut record = BookRecord::new("0000000000", Provider::OpenLibrary);
        record.preview_link = Some("preview".to_owned());
        record.info_link = Some("info".to_owned());

        assert!(render(&record).contains("Link:           preview"));
    }
}
