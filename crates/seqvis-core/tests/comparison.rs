use nalgebra::Point3;
use seqvis::core::io::annotations::read_annotations_from;
use seqvis::core::models::builder::MolecularSystemBuilder;
use seqvis::core::models::system::MolecularSystem;
use seqvis::engine::comparison::{ChainMapping, RegionSelection, compare};
use seqvis::engine::error::EngineError;
use seqvis::engine::loader::{ChainSelection, LoadOptions, extract_representatives};
use seqvis::engine::progress::ProgressReporter;
use seqvis::engine::region::parse_region_pair;
use seqvis::engine::scale::{difference_bound, display_bound};
use seqvis::engine::tracks::{AlignedValues, PaletteDefaults, align_tracks, build_tracks};

fn two_chain_system(len_a: usize, len_b: usize, twist: f64) -> MolecularSystem {
    let mut builder = MolecularSystemBuilder::new();
    for (chain, len) in [("A", len_a), ("B", len_b)] {
        builder.start_chain(chain);
        for i in 0..len {
            let t = i as f64 * twist;
            builder
                .start_residue(i as isize + 1, None, "LEU", false)
                .unwrap();
            builder.add_atom("N", Point3::new(t, 0.0, 0.0)).unwrap();
            builder
                .add_atom("CA", Point3::new(t.cos() * 5.0, t.sin() * 5.0, i as f64))
                .unwrap();
        }
    }
    builder.build()
}

fn chains(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[test]
fn inter_chain_block_of_self_comparison_is_zero() {
    let system = two_chain_system(100, 50, 0.3);
    let selection = ChainSelection::parse("A,B");
    let loaded =
        extract_representatives(&system, "model", &selection, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.len(), 150);

    let pair = parse_region_pair("A:0:99,B:0:49", Some(&loaded.boundaries)).unwrap();
    let mapping = ChainMapping::new(&chains(&["A", "B"]), &chains(&["A", "B"])).unwrap();
    let result = compare(
        &loaded,
        &loaded,
        &mapping,
        RegionSelection::Pairs(vec![pair]),
        &ProgressReporter::new(),
    )
    .unwrap();

    let detail = &result.details[0];
    assert_eq!(detail.a_sub.shape(), (100, 50));
    assert_eq!(detail.ba_sub.shape(), (50, 100));
    assert!(detail.ab_sub.iter().chain(detail.ba_sub.iter()).all(|v| *v == 0.0));
    assert_eq!(
        difference_bound(&result.diff_ab, &result.diff_ba, 95.0, None),
        0.0
    );
}

#[test]
fn differently_folded_models_share_one_display_range() {
    let a = two_chain_system(30, 20, 0.3);
    let b = two_chain_system(30, 20, 0.5);
    let selection = ChainSelection::parse("A,B");
    let loaded_a = extract_representatives(&a, "a", &selection, &LoadOptions::default()).unwrap();
    let loaded_b = extract_representatives(&b, "b", &selection, &LoadOptions::default()).unwrap();
    let mapping = ChainMapping::new(&chains(&["A", "B"]), &chains(&["A", "B"])).unwrap();

    let result = compare(
        &loaded_a,
        &loaded_b,
        &mapping,
        RegionSelection::Default,
        &ProgressReporter::new(),
    )
    .unwrap();
    let vmax = display_bound(&[&result.dist_a, &result.dist_b], 100.0, None);
    assert_eq!(vmax, result.dist_a.max().max(result.dist_b.max()));
    assert!(difference_bound(&result.diff_ab, &result.diff_ba, 100.0, None) > 0.0);
}

#[test]
fn chain_swap_with_unequal_lengths_is_rejected() {
    let a = two_chain_system(30, 20, 0.3);
    let loaded_a = extract_representatives(
        &a,
        "a",
        &ChainSelection::parse("A,B"),
        &LoadOptions::default(),
    )
    .unwrap();
    let loaded_b = extract_representatives(
        &a,
        "b",
        &ChainSelection::parse("B,A"),
        &LoadOptions::default(),
    )
    .unwrap();
    let mapping = ChainMapping::new(&chains(&["A", "B"]), &chains(&["B", "A"])).unwrap();

    let err = compare(
        &loaded_a,
        &loaded_b,
        &mapping,
        RegionSelection::Default,
        &ProgressReporter::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EngineError::SequenceLengthMismatch {
            len_a: 30,
            len_b: 20,
            ..
        }
    ));
}

#[test]
fn annotation_table_aligns_to_loaded_residues() {
    let system = two_chain_system(4, 3, 0.3);
    let loaded = extract_representatives(
        &system,
        "model",
        &ChainSelection::All,
        &LoadOptions::default(),
    )
    .unwrap();

    let table = "chain\ttrack\tstart\tend\tvalue\nA\tpLDDT\t0\t3\t90\nB\tpLDDT\t0\t0\t40\n";
    let records = read_annotations_from(table.as_bytes(), "inline").unwrap();
    let tracks = build_tracks(&records, None, &PaletteDefaults::default()).unwrap();
    let aligned = align_tracks(&tracks, &loaded.chain_labels());

    assert_eq!(aligned.len(), 1);
    assert_eq!(
        aligned[0].values,
        AlignedValues::Numerical(vec![
            Some(90.0),
            Some(90.0),
            Some(90.0),
            Some(90.0),
            Some(40.0),
            None,
            None
        ])
    );
}
