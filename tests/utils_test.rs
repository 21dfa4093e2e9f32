use spofavcli::types::Track;
use spofavcli::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artist: &str, popularity: u32) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        album: format!("{} Album", name),
        duration_ms: Some(210_000),
        preview_url: None,
        spotify_url: format!("https://open.spotify.com/track/{}", id),
        image_url: None,
        popularity,
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly 32 characters
    assert_eq!(state.len(), 32);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    let state2 = generate_state();
    assert_ne!(state, state2);
}

#[test]
fn test_format_track_duration() {
    assert_eq!(format_track_duration(0), "0:00");
    assert_eq!(format_track_duration(1_000), "0:01");
    assert_eq!(format_track_duration(61_000), "1:01");
    assert_eq!(format_track_duration(225_000), "3:45");
    // sub-second remainders are truncated
    assert_eq!(format_track_duration(59_999), "0:59");
}

#[test]
fn test_format_total_duration() {
    // under an hour only minutes are shown
    assert_eq!(format_total_duration(0), "0min");
    assert_eq!(format_total_duration(59 * 60 * 1000), "59min");

    // from one hour on the hour component appears
    assert_eq!(format_total_duration(60 * 60 * 1000), "1h 0min");
    assert_eq!(format_total_duration(83 * 60 * 1000), "1h 23min");
    assert_eq!(format_total_duration(2 * 60 * 60 * 1000 + 5 * 60 * 1000), "2h 5min");
}

#[test]
fn test_remove_duplicate_tracks() {
    let mut tracks = vec![
        create_test_track("id1", "Track 1", "Artist A", 10),
        create_test_track("id2", "Track 2", "Artist B", 20),
        create_test_track("id1", "Track 1 Duplicate", "Artist A", 10),
        create_test_track("id3", "Track 3", "Artist C", 30),
    ];

    remove_duplicate_tracks(&mut tracks);

    // Should keep the first occurrence of each unique id
    assert_eq!(tracks.len(), 3);
    let ids: Vec<&String> = tracks.iter().map(|t| &t.id).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);
    assert_eq!(tracks[0].name, "Track 1");
}

#[test]
fn test_top_artists_counts_descending() {
    let tracks = vec![
        create_test_track("1", "A", "Artist X", 0),
        create_test_track("2", "B", "Artist Y", 0),
        create_test_track("3", "C", "Artist Y", 0),
        create_test_track("4", "D", "Artist Z", 0),
        create_test_track("5", "E", "Artist Y", 0),
        create_test_track("6", "F", "Artist Z", 0),
    ];

    let top = top_artists(&tracks, 5);

    assert_eq!(
        top,
        vec![
            ("Artist Y".to_string(), 3),
            ("Artist Z".to_string(), 2),
            ("Artist X".to_string(), 1),
        ]
    );
}

#[test]
fn test_top_artists_ties_keep_first_encountered_order() {
    let tracks = vec![
        create_test_track("1", "A", "Second", 0),
        create_test_track("2", "B", "First", 0),
        create_test_track("3", "C", "First", 0),
        create_test_track("4", "D", "Second", 0),
    ];

    let top = top_artists(&tracks, 5);

    // both artists have two favorites; "Second" was encountered first
    assert_eq!(
        top,
        vec![("Second".to_string(), 2), ("First".to_string(), 2)]
    );
}

#[test]
fn test_top_artists_respects_limit() {
    let tracks: Vec<Track> = (0..8)
        .map(|i| create_test_track(&format!("id{}", i), "T", &format!("Artist {}", i), 0))
        .collect();

    let top = top_artists(&tracks, 5);
    assert_eq!(top.len(), 5);
}

#[test]
fn test_top_artists_empty() {
    assert!(top_artists(&[], 5).is_empty());
}

#[test]
fn test_mean_popularity() {
    // empty input never divides by zero
    assert_eq!(mean_popularity(&[]), 0.0);

    let tracks = vec![
        create_test_track("1", "A", "X", 40),
        create_test_track("2", "B", "Y", 60),
        create_test_track("3", "C", "Z", 80),
    ];
    assert_eq!(mean_popularity(&tracks), 60.0);
}
