//! Trek pricing and rupee formatting.

/// Total price for a party, in whole rupees.
pub fn total_price(price_per_person: u64, participants: u32) -> u64 {
    price_per_person.saturating_mul(u64::from(participants))
}

/// Formats whole rupees with Indian digit grouping, e.g. `₹1,00,000`.
pub fn format_inr(amount: u64) -> String {
    format!("₹{}", group_indian(amount))
}

/// Groups digits the Indian way: the last three together, then pairs.
fn group_indian(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
