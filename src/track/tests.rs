use super::*;
use crate::config::TrackField;

fn song() -> Track {
    let mut t = Track::new("t1", "Song");
    t.artist = Some("  Artist  ".into());
    t.album = Some("Album".into());
    t.track_number = Some(3);
    t.path = Some(PathBuf::from("/tmp/music/03 Song.flac"));
    t
}

#[test]
fn display_from_fields_can_format_artist_title() {
    let t = song();
    assert_eq!(
        display_from_fields(&t, &[TrackField::Artist, TrackField::Title], " - "),
        "Artist - Song"
    );

    let mut bare = t.clone();
    bare.artist = None;
    assert_eq!(
        display_from_fields(&bare, &[TrackField::Artist, TrackField::Title], " - "),
        "Song"
    );
}

#[test]
fn display_from_fields_formats_numbers_with_disc_prefix_only_past_disc_one() {
    let mut t = song();
    assert_eq!(display_from_fields(&t, &[TrackField::Number], ""), "03");

    t.disc_number = Some(1);
    assert_eq!(display_from_fields(&t, &[TrackField::Number], ""), "03");

    t.disc_number = Some(2);
    assert_eq!(display_from_fields(&t, &[TrackField::Number], ""), "2-03");
}

#[test]
fn display_from_fields_falls_back_to_title_when_nothing_matches() {
    let mut t = Track::new("t2", "Lonely");
    t.path = None;
    assert_eq!(
        display_from_fields(&t, &[TrackField::Filename, TrackField::Album], "::"),
        "Lonely"
    );

    let t = song();
    assert_eq!(
        display_from_fields(&t, &[TrackField::Filename], "::"),
        "03 Song"
    );
}

#[test]
fn track_id_displays_its_raw_value() {
    let id = TrackId::new("spotify:track:42");
    assert_eq!(id.to_string(), "spotify:track:42");
    assert_eq!(id.as_str(), "spotify:track:42");
}
