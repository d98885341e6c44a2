//! Concurrent access tests for both backends.

use super::*;

#[test]
fn concurrent_writers_and_readers_see_whole_records() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 25;

    for (store, _temp) in all_stores() {
        let store: Arc<dyn PasteStore> = Arc::from(store);
        let barrier = Arc::new(Barrier::new(WRITERS));

        let handles: Vec<_> = (0..WRITERS)
            .map(|worker| {
                let store = store.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let mut written = Vec::with_capacity(PER_WRITER);
                    for n in 0..PER_WRITER {
                        let id = generate_id();
                        let content =
                            format!("worker {} paste {}\n{}", worker, n, "x".repeat(n * 64));
                        store.put(&id, "text", &content).expect("concurrent put");
                        let read_back = store.get(&id).expect("get").expect("own write visible");
                        assert_eq!(read_back.content, content);
                        written.push((id, content));
                    }
                    written
                })
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            for (id, content) in handle.join().expect("writer join") {
                let paste = store.get(&id).expect("get").expect("present");
                assert_eq!(paste.content, content);
                total += 1;
            }
        }
        assert_eq!(total, WRITERS * PER_WRITER);
    }
}

#[test]
fn racing_puts_on_same_id_have_exactly_one_winner() {
    const RACERS: usize = 6;

    for (store, _temp) in all_stores() {
        let store: Arc<dyn PasteStore> = Arc::from(store);
        let id = generate_id();
        let barrier = Arc::new(Barrier::new(RACERS));

        let handles: Vec<_> = (0..RACERS)
            .map(|racer| {
                let store = store.clone();
                let barrier = barrier.clone();
                let id = id.clone();
                thread::spawn(move || {
                    barrier.wait();
                    store.put(&id, "text", &format!("racer {}", racer))
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("racer join"))
            .collect();
        let winners = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(winners, 1, "backend {}", store.backend());
        assert!(results
            .iter()
            .filter_map(|result| result.as_ref().err())
            .all(|err| matches!(err, AppError::DuplicateKey(_))));

        let paste = store.get(&id).expect("get").expect("winner stored");
        assert!(paste.content.starts_with("racer "));
    }
}
