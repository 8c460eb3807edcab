use rs_nts_core::format;
use rs_nts_core::model::trainer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Corpus file, one sentence per line. The first run trains a tree and
    // caches it next to the corpus as a .nts file; later runs load the
    // cache directly.
    let corpus_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/corpus.txt".to_owned());

    // N-gram size: windows of up to 4 words feed the tree
    let order = 4;

    let tree = trainer::load_or_train(&corpus_path, order)?;
    println!(
        "Model ready: {} nodes below root '{}'",
        tree.node_count(),
        tree.word()
    );

    // Round-trip the tree through an in-memory buffer to show the
    // serialized size and that nothing is lost on the way
    let mut bytes = Vec::new();
    format::serialize_tree(&tree, &mut bytes)?;
    println!("Serialized size: {} bytes", bytes.len());

    let mut reader = &bytes[..];
    let reloaded = format::deserialize_tree(&mut reader)?;
    if reloaded == tree {
        println!("Round trip OK: reloaded tree is structurally identical");
    } else {
        println!("Should not happen: reloaded tree differs");
    }

    // The bank explains most of the size win: repeated vocabulary is
    // written once and referenced everywhere else
    let bank = format::compile_word_bank(&tree);
    println!("Word bank: {} entries", bank.len());
    for word in bank.iter().take(5) {
        println!("  banked: {}", word);
    }

    // Generate a few word sequences from the model
    for i in 0..5 {
        let words = tree.generate(order, 20);
        println!("Generated sentence {}: {}", i + 1, words.join(" "));
    }

    Ok(())
}
