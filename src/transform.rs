use crate::config::FeedProfile;
use crate::domain::{ChannelRecord, SourceRecord};
use crate::error::FeedError;
use crate::numbering::Numberer;

pub fn transform(
    records: &[SourceRecord],
    profile: &FeedProfile,
    numberer: &mut Numberer<'_>,
) -> Result<Vec<ChannelRecord>, FeedError> {
    let mut channels = Vec::with_capacity(records.len());

    for record in records {
        let Some(link) = record.playable_link() else {
            continue;
        };
        let name = record.display_name();
        let key = numbering_key(record, &name, &link);
        let number = numberer.assign(key)?;

        channels.push(ChannelRecord {
            channel_number: number,
            platform: profile.platform.clone(),
            link_type: profile.link_type.clone(),
            channel_name: name,
            sub_text: profile.sub_text.clone(),
            start_time: String::new(),
            owner_info: profile.owner_info.clone(),
            channel_url: link,
            thumbnail: profile.thumbnail.clone(),
        });
    }

    Ok(channels)
}

fn numbering_key<'a>(record: &'a SourceRecord, name: &'a str, link: &'a str) -> &'a str {
    match record.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ if !name.is_empty() => name,
        _ => link,
    }
}
