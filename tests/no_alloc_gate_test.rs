use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use polytris::core::{Game, GameSnapshot};
use polytris::types::{Command, GameConfig};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut game = Game::new(GameConfig::for_shape_size(5)).unwrap();
    let mut snap = GameSnapshot::default();

    // Warm-up: builds the shape table and sizes the snapshot buffers.
    let _ = game.tick();
    let _ = game.apply(Command::MoveLeft);
    let _ = game.apply(Command::Hold(0));
    game.snapshot_into(&mut snap);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let _ = game.tick();
        }

        for _ in 0..50 {
            let _ = game.apply(Command::MoveLeft);
            let _ = game.apply(Command::MoveRight);
            let _ = game.apply(Command::RotateCw);
            let _ = game.apply(Command::RotateCcw);
            let _ = game.apply(Command::SlideRight);
            game.snapshot_into(&mut snap);
        }

        // Hard drops drive locking, line clears and spawning.
        for i in 0..40 {
            if game.is_game_over() {
                break;
            }
            if i % 3 == 0 {
                let _ = game.apply(Command::SlideLeft);
            }
            let _ = game.apply(Command::HardDrop);
            let _ = game.apply(Command::Hold(i % 5));
            game.snapshot_into(&mut snap);
        }
    });

    assert!(allocs == 0);
}
