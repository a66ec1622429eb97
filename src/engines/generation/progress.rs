use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, best_gate_count: usize);
}

/// Logs every `log_every` generations and keeps the best-fitness history.
pub struct LogProgressCallback {
    log_every: usize,
    history: Vec<f64>,
}

impl LogProgressCallback {
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting", generation);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, best_gate_count: usize) {
        self.history.push(best_fitness);
        if generation % self.log_every == 0 {
            log::info!(
                "Generation {}: best fitness = {:.4}, circuit size = {}",
                generation,
                best_fitness,
                best_gate_count
            );
        }
    }
}

// For feeding a live display from another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        best_fitness: f64,
        best_gate_count: usize,
    },
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, best_gate_count: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            best_gate_count,
        });
    }
}
