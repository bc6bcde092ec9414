mod model_loading;
mod scoring;
mod settings;
