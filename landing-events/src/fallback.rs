use crate::record::{CTA_LABEL, DEFAULT_LOCATION, EventRecord};
use landing_common::DEFAULT_EVENTS_URL;

const BUCKET: &str = "https://gyandhan.s3.ap-south-1.amazonaws.com/uploads/event/large_image";

/// The two placeholder events shown whenever nothing usable was extracted.
pub fn fallback_events() -> Vec<EventRecord> {
    [
        (
            "Complete Guide to Studying Abroad After 12th: From Admission to Loans",
            "Nov 29, 2025",
            "845/event_25th_large_image_845e8c1728ba7c0be_banner.webp",
        ),
        (
            "Ireland's Study Abroad Revolution: Smart Move or Strategic Mirage?",
            "Nov 30, 2025",
            "836/Ireland_s_Study_Abroad_Revolution_Smart_Move_or_Strategic_Mirage_event_page_images_14_Nov_2025_64b9c3be7518d1ffc179.webp",
        ),
    ]
    .into_iter()
    .map(|(title, date, image)| EventRecord {
        title: title.to_string(),
        date: date.to_string(),
        location: DEFAULT_LOCATION.to_string(),
        url: DEFAULT_EVENTS_URL.to_string(),
        image: format!("{BUCKET}/{image}"),
        cta_label: CTA_LABEL.to_string(),
    })
    .collect()
}
