use fcf3::builder::Builder;
use fcf3::filter::{Filter, FilterOptions};
use fcf3::format::container::{write_container, Container};

fn build_bytes(words: &[&str]) -> Vec<u8> {
    let mut builder = Builder::new();
    for w in words {
        builder.insert(w);
    }
    let tables = builder.build();
    let mut bytes = Vec::new();
    write_container(
        &mut bytes,
        &tables.nodes,
        &tables.edges,
        &tables.hashes,
        tables.min_len,
        tables.max_len,
    )
    .unwrap();
    bytes
}

#[test]
fn container_round_trips_structurally() {
    let mut builder = Builder::new();
    for w in ["alpha", "beta", "gamma", "alphabet"] {
        builder.insert(w);
    }
    let tables = builder.build();

    let mut bytes = Vec::new();
    write_container(
        &mut bytes,
        &tables.nodes,
        &tables.edges,
        &tables.hashes,
        tables.min_len,
        tables.max_len,
    )
    .unwrap();

    let container = Container::parse(&bytes).unwrap();
    let trie = container.trie();
    assert_eq!(trie.node_count(), tables.nodes.len());
    assert_eq!(trie.edge_count(), tables.edges.len());
    for i in 0..tables.nodes.len() as u32 {
        assert_eq!(trie.node(i), tables.nodes[i as usize]);
    }
    let mut reconstructed_edges = Vec::new();
    for i in 0..tables.nodes.len() as u32 {
        reconstructed_edges.extend_from_slice(trie.edges(i));
    }
    assert_eq!(reconstructed_edges, tables.edges);

    let hash_set = container.hash_set();
    assert_eq!(hash_set.len(), tables.hashes.len());
    for &h in &tables.hashes {
        assert!(hash_set.contains(h));
    }
}

#[test]
fn builder_container_filter_pipeline() {
    let bytes = build_bytes(&["spam", "junk", "malware"]);

    // the blob itself parses as a well-formed container
    let container = Container::parse(&bytes).unwrap();
    assert_eq!(container.header().hash_count, 3);

    let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();
    assert!(filter.contains("this looks like spam"));
    assert!(filter.contains("MALWARE alert"));
    assert!(!filter.contains("a clean message"));
}

#[test]
fn find_matches_reports_all_non_overlapping_hits() {
    let bytes = build_bytes(&["foo", "bar"]);
    let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();

    let matches = filter.find_matches("foo and bar and foo again");
    assert_eq!(matches.len(), 3);
}

#[test]
fn mask_preserves_code_unit_length_on_non_ascii_text() {
    let bytes = build_bytes(&["bad"]);
    let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();

    let text = "café is bad";
    let masked = filter.mask(text);
    assert_eq!(masked.encode_utf16().count(), text.encode_utf16().count());
    assert!(masked.contains("café"));
    assert!(masked.contains("***"));
}

#[test]
fn mask_is_idempotent_once_matches_are_replaced() {
    let bytes = build_bytes(&["bad"]);
    let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();

    let once = filter.mask("so bad");
    let twice = filter.mask(&once);
    assert_eq!(once, twice);
}

#[test]
fn fixed_mask_replaces_matches_with_a_configured_string() {
    let bytes = build_bytes(&["bad"]);
    let options = FilterOptions {
        fixed_mask: Some("[censored]".to_string()),
        ..FilterOptions::default()
    };
    let filter = Filter::load_bytes(bytes, options).unwrap();

    assert_eq!(filter.mask("so bad today"), "so [censored] today");
}

#[test]
fn loading_a_corrupt_container_fails_cleanly() {
    let mut bytes = build_bytes(&["bad"]);
    bytes[0] ^= 0xFF; // corrupt the magic
    assert!(Filter::load_bytes(bytes, FilterOptions::default()).is_err());
}

#[test]
fn load_path_round_trips_through_a_real_file() {
    let bytes = build_bytes(&["bad", "worse"]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.fcf3");
    std::fs::write(&path, &bytes).unwrap();

    let filter = Filter::load_path(&path, FilterOptions::default()).unwrap();
    assert!(filter.contains("worse than bad"));
}
