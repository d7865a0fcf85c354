//! Unit tests for the event cache

#[cfg(test)]
mod tests {
    use leaderboard_proxy::ranking::compute_top10;
    use leaderboard_proxy::sheets::{CacheEntry, SheetCache, DEFAULT_TTL_SECS};
    use std::sync::Arc;

    fn entry_for(rows: Vec<Vec<String>>) -> CacheEntry {
        CacheEntry {
            top10: compute_top10(&rows),
            full_data: rows,
        }
    }

    #[test]
    fn test_default_ttl_is_five_hours() {
        assert_eq!(DEFAULT_TTL_SECS, 18_000);
    }

    #[test]
    fn test_round_trip_keeps_data_and_ranking() {
        let cache = SheetCache::default();
        let rows = vec![
            vec!["Name".to_string(), "Score".to_string()],
            vec!["Alice".to_string(), "10".to_string()],
        ];
        let entry = entry_for(rows);

        cache.insert("Finals".to_string(), entry.clone());

        assert_eq!(cache.get("Finals"), Some(entry));
    }

    #[test]
    fn test_expired_entry_is_a_miss_then_refillable() {
        let cache = SheetCache::new(0);
        let rows = vec![vec!["Name".to_string()]];

        cache.insert("Finals".to_string(), entry_for(rows.clone()));
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(cache.get("Finals").is_none());

        let fresh = SheetCache::default();
        fresh.insert("Finals".to_string(), entry_for(rows));
        assert!(fresh.get("Finals").is_some());
    }

    #[test]
    fn test_concurrent_writers_on_different_keys() {
        let cache = Arc::new(SheetCache::default());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let rows = vec![
                        vec!["Name".to_string(), "Score".to_string()],
                        vec![format!("p{i}"), i.to_string()],
                    ];
                    cache.insert(format!("event{i}"), entry_for(rows));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8);
        for i in 0..8 {
            let cached = cache.get(&format!("event{i}")).unwrap();
            assert_eq!(cached.top10[0].name, format!("p{i}"));
        }
    }
}
