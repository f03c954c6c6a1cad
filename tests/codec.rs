use huffman_coding::{
    Artifact, FrequencyTable, HuffmanError, build_code_table, build_huffman_tree, compress,
    decode, decompress, encode,
};

#[test]
fn test_worked_example() {
    let freq = FrequencyTable::from_text("abbcccd");
    let table = build_code_table(&build_huffman_tree(&freq).unwrap());

    let shortest = table.values().map(Vec::len).min().unwrap();
    assert_eq!(table[&'c'].len(), shortest);
    assert_eq!(table[&'a'].len(), table[&'d'].len());
    assert!(table.values().all(|code| code.len() <= table[&'a'].len()));

    assert_eq!(decompress(&compress("abbcccd").unwrap()).unwrap(), "abbcccd");
}

#[test]
fn test_empty_input() {
    let bytes = compress("").unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 0, 0]);
    assert_eq!(decompress(&bytes).unwrap(), "");
}

#[test]
fn test_single_symbol_input() {
    let artifact = encode("aaaaaaaaaa").unwrap();
    assert_eq!(artifact.encoded_bit_len(), 10);
    assert_eq!(decode(&artifact).unwrap(), "aaaaaaaaaa");
}

#[test]
fn test_skewed_input_beats_fixed_width() {
    let text = "a".repeat(900) + &"b".repeat(60) + &"c".repeat(30) + "dddddddddd";
    let artifact = encode(&text).unwrap();
    // 4 symbols need 2 bits each at fixed width
    assert!(artifact.encoded_bit_len() < 2 * text.len());
    assert!(artifact.byte_len() < text.len());
}

#[test]
fn test_tie_break_is_stable() {
    let text = "aabbccdd";
    let first = compress(text).unwrap();
    for _ in 0..20 {
        assert_eq!(compress(text).unwrap(), first);
    }
    let tree = build_huffman_tree(&FrequencyTable::from_text(text)).unwrap();
    let again = build_huffman_tree(&FrequencyTable::from_text("dcbadcba")).unwrap();
    assert_eq!(tree, again);
}

#[test]
fn test_multiline_text() {
    let text = "Huffman coding\n\tassigns short codes\r\nto frequent symbols.\n";
    assert_eq!(decompress(&compress(text).unwrap()).unwrap(), text);
}

#[test]
fn test_corrupted_padding_is_rejected() {
    let mut bytes = compress("hello world").unwrap();
    let artifact = Artifact::from_bytes(&bytes).unwrap();
    let padding_at = artifact.header_len() - 1;
    bytes[padding_at] = 9;
    assert!(matches!(
        decompress(&bytes),
        Err(HuffmanError::MalformedArtifact { .. })
    ));
}

/// "abbcccd" packs to 110 10 10 0 | 0 0 111 + 3 padding bits; keeps the first byte
/// and reveals `bits` of it.
fn abbcccd_cut_after(bits: u8) -> Vec<u8> {
    let mut artifact = encode("abbcccd").unwrap();
    artifact.payload.truncate(1);
    artifact.padding = 8 - bits;
    artifact.to_bytes()
}

#[test]
fn test_payload_cut_mid_code_is_truncated() {
    // 110 1 -> 'a' and half of 'b'
    match decompress(&abbcccd_cut_after(4)) {
        Err(HuffmanError::TruncatedBitstream { decoded }) => assert_eq!(decoded, 1),
        other => panic!("expected TruncatedBitstream, got {:?}", other),
    }
}

#[test]
fn test_payload_cut_on_code_boundary_is_malformed() {
    // 110 10 10 0 -> four whole symbols of seven
    match decompress(&abbcccd_cut_after(8)) {
        Err(HuffmanError::MalformedArtifact { reason }) => {
            assert!(reason.contains("decoded 4 symbols"), "{}", reason)
        }
        other => panic!("expected MalformedArtifact, got {:?}", other),
    }
}

#[test]
fn test_truncated_header_is_rejected() {
    let bytes = compress("hello world").unwrap();
    for len in 0..Artifact::from_bytes(&bytes).unwrap().header_len() {
        assert!(matches!(
            decompress(&bytes[..len]),
            Err(HuffmanError::MalformedArtifact { .. })
        ));
    }
}
