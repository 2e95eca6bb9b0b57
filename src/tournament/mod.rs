pub mod tournament_dto;
pub mod tournament_handlers;
pub mod tournament_models;
pub mod tournament_repository;
pub mod tournament_service;
