use lexitrie::{LeafId, Trie};

fn print_family(trie: &Trie, id: LeafId, depth: usize) {
    let leaf = trie.leaf(id);
    println!(
        "{}{} - locators: {}, synthetic: {}",
        "  ".repeat(depth + 1),
        leaf.pathe,
        leaf.locators.len(),
        leaf.is_synthetic()
    );
    for &child in &leaf.inflected_forms {
        print_family(trie, child, depth + 1);
    }
}

fn main() {
    let input = "The cat runs. The cats ran fast! Children went home, a child goes home.";
    println!("Input: {}", input);

    let mut trie = Trie::new();
    trie.add(input);

    println!("\nSentences:");
    for (i, sentence) in trie.sentences().iter().enumerate() {
        println!("  {}: {:?}", i, sentence.text);
    }

    let claimed = trie.collapse_stems();
    println!("\nCollapsed {} inflected forms", claimed);

    let linked = trie.merge_derived_word_into_stem(&lexitrie::IrregularTable::english());
    println!("Linked {} irregular forms", linked);

    println!("\nFamilies:");
    for id in trie.leaf_ids() {
        if trie.leaf(id).is_root() && !trie.family(id).locators.is_empty() {
            print_family(&trie, id, 0);
        }
    }
}
