use camino::Utf8Path;
use serde::Serialize;

use crate::config::SelectionConfig;
use crate::domain::{ChannelRecord, SelectionRule};
use crate::error::FeedError;
use crate::source::SourceClient;
use crate::store;

#[derive(Debug, Clone, Serialize)]
pub struct SelectSummary {
    pub source: String,
    pub output_path: String,
    pub rules: usize,
    pub matched: usize,
    pub generated_at: String,
}

pub fn pair_rules(
    names: &[String],
    replacements: &[String],
) -> Result<Vec<SelectionRule>, FeedError> {
    if names.len() != replacements.len() {
        return Err(FeedError::RuleCountMismatch {
            names: names.len(),
            replacements: replacements.len(),
        });
    }
    Ok(names
        .iter()
        .zip(replacements)
        .map(|(match_name, replacement_name)| SelectionRule {
            match_name: match_name.clone(),
            replacement_name: replacement_name.clone(),
        })
        .collect())
}

pub fn select(channels: &[ChannelRecord], rules: &[SelectionRule]) -> Vec<ChannelRecord> {
    let mut selected = Vec::new();
    for rule in rules {
        for channel in channels {
            if channel.channel_name == rule.match_name {
                selected.push(channel.renamed(&rule.replacement_name));
            }
        }
    }
    selected
}

pub fn run_select<S: SourceClient>(
    client: &S,
    config: &SelectionConfig,
) -> Result<SelectSummary, FeedError> {
    let rules = pair_rules(&config.selected_channels, &config.replacement_names)?;
    let channels = load_channels(client, &config.source)?;
    let selected = select(&channels, &rules);

    store::write_channels(Utf8Path::new(&config.output), &selected)?;

    Ok(SelectSummary {
        source: config.source.clone(),
        output_path: config.output.clone(),
        rules: rules.len(),
        matched: selected.len(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn load_channels<S: SourceClient>(
    client: &S,
    source: &str,
) -> Result<Vec<ChannelRecord>, FeedError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let value = client.fetch_json(source)?;
        if !value.is_array() {
            return Err(FeedError::UnexpectedPayload(
                "selection source is not an array".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|err| FeedError::UnexpectedPayload(err.to_string()))
    } else {
        store::read_channels(Utf8Path::new(source))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::numbering::ChannelNumber;

    fn channel(number: u16, name: &str) -> ChannelRecord {
        ChannelRecord {
            channel_number: ChannelNumber::new(number).unwrap(),
            platform: "CricHD".to_string(),
            link_type: "app".to_string(),
            channel_name: name.to_string(),
            sub_text: "Live Streaming Now".to_string(),
            start_time: String::new(),
            owner_info: "Stream provided by public source".to_string(),
            channel_url: format!("http://x/{number}"),
            thumbnail: "http://x/thumb.png".to_string(),
        }
    }

    fn rules(pairs: &[(&str, &str)]) -> Vec<SelectionRule> {
        pairs
            .iter()
            .map(|(m, r)| SelectionRule {
                match_name: m.to_string(),
                replacement_name: r.to_string(),
            })
            .collect()
    }

    #[test]
    fn pair_rules_zips_in_order() {
        let paired = pair_rules(
            &["Willow HD".to_string(), "Sky Sports Cricket".to_string()],
            &["CPL 2025".to_string(), "SA vs ENG".to_string()],
        )
        .unwrap();

        assert_eq!(paired.len(), 2);
        assert_eq!(paired[0].match_name, "Willow HD");
        assert_eq!(paired[0].replacement_name, "CPL 2025");
        assert_eq!(paired[1].match_name, "Sky Sports Cricket");
        assert_eq!(paired[1].replacement_name, "SA vs ENG");
    }

    #[test]
    fn pair_rules_rejects_mismatched_lengths() {
        let err = pair_rules(
            &["Willow HD".to_string(), "TNT 4".to_string()],
            &["CPL 2025".to_string()],
        )
        .unwrap_err();

        assert_matches!(
            err,
            FeedError::RuleCountMismatch {
                names: 2,
                replacements: 1
            }
        );
    }

    #[test]
    fn pair_rules_accepts_empty() {
        assert!(pair_rules(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn select_outputs_in_rule_order() {
        let channels = vec![channel(1, "Alpha"), channel(2, "Beta")];
        let selected = select(&channels, &rules(&[("Beta", "Two"), ("Alpha", "One")]));

        let names: Vec<&str> = selected.iter().map(|c| c.channel_name.as_str()).collect();
        assert_eq!(names, vec!["Two", "One"]);
        assert_eq!(selected[0].channel_number.get(), 2);
        assert_eq!(selected[1].channel_number.get(), 1);
    }

    #[test]
    fn select_takes_every_exact_match() {
        let channels = vec![
            channel(1, "Willow HD"),
            channel(2, "Willow HD 2"),
            channel(3, "Willow HD"),
        ];
        let selected = select(&channels, &rules(&[("Willow HD", "CPL 2025")]));

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].channel_number.get(), 1);
        assert_eq!(selected[1].channel_number.get(), 3);
        assert!(selected.iter().all(|c| c.channel_name == "CPL 2025"));
    }

    #[test]
    fn select_does_not_rematch_renamed_records() {
        let channels = vec![channel(1, "Alpha")];
        let selected = select(&channels, &rules(&[("Alpha", "Beta"), ("Beta", "Gamma")]));

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].channel_name, "Beta");
    }

    #[test]
    fn select_without_matches_is_empty() {
        let channels = vec![channel(1, "Alpha")];
        assert!(select(&channels, &rules(&[("Missing", "X")])).is_empty());
    }
}
