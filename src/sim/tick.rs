//! Per-frame simulation step
//!
//! One `tick` advances every entity, resolves the player against platforms,
//! walls and projectiles, drains the pending camera shift into score, and
//! detects the end of the run. Procedural generation lives here too:
//! trimming what scrolled away and topping the column back up.

use rand::Rng;

use super::collision::{circle_hits_rect, spans_overlap, sweeps_across};
use super::state::{Cannon, Phase, Platform, PlatformKind, Player, Session, Side};
use crate::consts::*;
use crate::input::InputState;

impl<R: Rng> Session<R> {
    /// (Re)initialize the run: fresh player grounded on a base platform,
    /// empty hazard lists, counters zeroed
    pub fn start(&mut self) {
        self.phase = Phase::Running;
        self.distance = 0.0;
        self.score = 0;
        self.display_score = 0.0;
        self.pending_shift = 0.0;
        self.cannons.clear();
        self.projectiles.clear();
        self.next_cannon_distance = CANNON_SPACING;
        self.platforms.clear();
        self.spawn_initial_platforms();

        let mut player = Player::new(self.arena.width / 2.0, self.arena.height * 0.7);
        player.on_ground = true;
        if let Some(base) = self.platforms.first() {
            player.ground_platform = Some(base.id);
            player.pos.y = base.top() - player.height;
            player.prev_y = player.pos.y;
        }
        self.player = Some(player);
        log::info!("Session started (best score {})", self.best_score);
    }

    /// Advance the simulation by one frame. `dt` is clamped so a frame hitch
    /// cannot explode the physics; outside the Running phase this is a no-op.
    pub fn tick(&mut self, input: &mut InputState, dt: f32) {
        let dt = dt.clamp(0.0, MAX_DT);
        self.time += dt;
        if self.phase == Phase::Running {
            self.update(input, dt);
        }
    }

    fn update(&mut self, input: &mut InputState, dt: f32) {
        for platform in &mut self.platforms {
            platform.update(dt, self.arena.height, &mut self.rng);
        }
        self.trim_platforms();
        self.trim_hazards();

        let arena = self.arena;
        let Some(player) = self.player.as_mut() else {
            return;
        };

        player.prev_y = player.pos.y;
        let was_on_ground = player.on_ground;

        if !player.on_ground {
            player.vel.y += GRAVITY * dt;
        } else {
            player.vel.y = 0.0;
        }
        player.touching_left_wall = false;
        player.touching_right_wall = false;

        player.vel.x = input.horizontal() * MOVE_SPEED + player.extra_push;
        player.extra_push *= PUSH_DECAY;
        player.pos.x += player.vel.x * dt;

        let min_x = arena.min_x();
        let max_x = arena.max_x(player.width);
        if player.pos.x <= min_x {
            player.pos.x = min_x;
            player.touching_left_wall = true;
            // Residual push into the wall is spent
            player.extra_push = player.extra_push.max(0.0);
        }
        if player.pos.x >= max_x {
            player.pos.x = max_x;
            player.touching_right_wall = true;
            player.extra_push = player.extra_push.min(0.0);
        }

        // Walking off the supporting platform drops to airborne
        if player.on_ground
            && let Some(id) = player.ground_platform
            && let Some(platform) = self.platforms.iter().find(|p| p.id == id)
            && (player.right() <= platform.left() || player.left() >= platform.right())
        {
            player.on_ground = false;
            player.ground_platform = None;
            player.clear_surface_effects();
        }

        if input.consume_jump() {
            let mut jumped = false;
            if was_on_ground {
                let mut can_jump_from_ground = true;
                let on_sticky = player.ground_platform.is_some_and(|id| {
                    self.platforms
                        .iter()
                        .any(|p| p.id == id && matches!(p.kind, PlatformKind::Sticky))
                });
                if on_sticky {
                    if self.rng.random::<f32>() < STICKY_SUCCESS_CHANCE {
                        player.shake_timer = 0.0;
                    } else {
                        can_jump_from_ground = false;
                        player.shake_timer = STICKY_SHAKE_DURATION;
                    }
                }
                if can_jump_from_ground {
                    // The takeoff platform records the jump before launch
                    if let Some(id) = player.ground_platform
                        && let Some(platform) = self.platforms.iter_mut().find(|p| p.id == id)
                    {
                        platform.register_jump(&mut self.rng);
                    }
                    player.vel.y = -player.ground_jump_force();
                    player.on_ground = false;
                    player.ground_platform = None;
                    player.clear_surface_effects();
                    jumped = true;
                }
            }
            if !jumped
                && player.knock_timer <= 0.0
                && (player.touching_left_wall || player.touching_right_wall)
            {
                let dir = if player.touching_left_wall { 1.0 } else { -1.0 };
                player.vel.y = -WALL_JUMP_STRENGTH;
                player.extra_push = dir * MOVE_SPEED * WALL_JUMP_PUSH;
                player.clear_surface_effects();
            }
        }

        player.pos.y += player.vel.y * dt;

        let mut landed: Option<u32> = None;
        if player.vel.y > 0.0 && player.knock_timer <= 0.0 {
            for platform in &self.platforms {
                if !platform.is_solid() {
                    continue;
                }
                // Swept test against the top edge; a point test would tunnel
                // at high fall speeds
                let crossed = sweeps_across(
                    player.prev_y + player.height,
                    player.bottom(),
                    platform.top(),
                );
                if crossed
                    && spans_overlap(
                        player.left(),
                        player.right(),
                        platform.left(),
                        platform.right(),
                    )
                {
                    player.pos.y = platform.top() - player.height;
                    player.vel.y = 0.0;
                    landed = Some(platform.id);
                    break;
                }
            }
        }

        if let Some(id) = landed {
            player.on_ground = true;
            player.ground_platform = Some(id);
            let landing = self.platforms.iter().find(|p| p.id == id);
            let still_solid = landing.is_some_and(Platform::is_solid);
            let on_sticky = landing.is_some_and(|p| matches!(p.kind, PlatformKind::Sticky));
            if still_solid && on_sticky {
                player.shake_timer = 0.0;
            } else if still_solid {
                player.clear_surface_effects();
            }
            if !still_solid {
                // The surface gave way within the same frame; the landing
                // never sticks
                player.on_ground = false;
                player.ground_platform = None;
                player.clear_surface_effects();
            } else {
                // Landing above the target band owes the camera a scroll
                let shift = arena.target_player_y() - player.pos.y;
                if shift > 0.0 {
                    self.pending_shift += shift;
                }
            }
        } else if player.vel.y != 0.0 {
            player.on_ground = false;
            if player.vel.y > 0.0 {
                player.ground_platform = None;
                player.clear_surface_effects();
            }
        } else if player.on_ground
            && let Some(id) = player.ground_platform
            && let Some(platform) = self.platforms.iter().find(|p| p.id == id)
        {
            // Stay glued to the supporting surface
            player.pos.y = platform.top() - player.height;
        }

        if player.shake_timer > 0.0 {
            player.shake_timer = (player.shake_timer - dt).max(0.0);
        }
        if player.knock_timer > 0.0 {
            player.knock_timer = (player.knock_timer - dt).max(0.0);
        }

        self.update_cannons(dt);
        self.update_projectiles(dt);
        self.handle_projectile_hits();
        self.check_smoke();

        self.process_pending_shift(dt);
        self.update_display_score(dt);

        if self
            .player
            .as_ref()
            .is_some_and(|p| p.pos.y > self.arena.height)
        {
            self.finish_run();
        }
    }

    fn update_cannons(&mut self, dt: f32) {
        let arena = self.arena;
        for cannon in &mut self.cannons {
            cannon.update(dt, &arena, &mut self.projectiles, &mut self.rng);
        }
    }

    fn update_projectiles(&mut self, dt: f32) {
        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }
        let width = self.arena.width;
        self.projectiles
            .retain(|p| p.active && !p.is_out_of_bounds(width));
    }

    fn handle_projectile_hits(&mut self) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        // Knockback doubles as invulnerability
        if player.knock_timer > 0.0 {
            return;
        }
        let (rect_min, rect_max) = player.rect();
        let mut hit_vx = None;
        for projectile in &mut self.projectiles {
            if !projectile.active {
                continue;
            }
            if circle_hits_rect(projectile.pos, projectile.radius, rect_min, rect_max) {
                projectile.active = false;
                hit_vx = Some(projectile.vx);
                break;
            }
        }
        if let Some(vx) = hit_vx {
            player.knock_timer = KNOCKBACK_DURATION;
            player.vel.y = player.vel.y.max(80.0);
            let push_dir = if vx >= 0.0 { 1.0 } else { -1.0 };
            player.extra_push = vx * 0.35 + push_dir * 80.0;
            player.on_ground = false;
            player.ground_platform = None;
            player.clear_surface_effects();
            player.pos.y += 2.0;
            player.shake_timer = 0.0;
        }
        self.projectiles.retain(|p| p.active);
    }

    fn check_smoke(&mut self) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let mut in_smoke = false;
        for platform in &self.platforms {
            let Some((cloud_top, cloud_bottom)) = platform.cloud_zone() else {
                continue;
            };
            let overlaps_x = spans_overlap(
                player.left(),
                player.right(),
                platform.left(),
                platform.right(),
            );
            let overlaps_y = player.pos.y < cloud_bottom && player.bottom() > cloud_top;
            if overlaps_x && overlaps_y {
                in_smoke = true;
                break;
            }
        }
        player.in_smoke = in_smoke;
    }

    fn process_pending_shift(&mut self, dt: f32) {
        if self.pending_shift <= 0.0 {
            return;
        }
        let step = self.pending_shift.min(SHIFT_SPEED * dt);
        self.apply_shift(step);
        self.pending_shift -= step;
    }

    /// Move the whole world down by `amount` and bank it as climb distance
    fn apply_shift(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.pos.y += amount;
        }
        for platform in &mut self.platforms {
            platform.pos.y += amount;
        }
        for cannon in &mut self.cannons {
            cannon.y += amount;
        }
        for projectile in &mut self.projectiles {
            projectile.pos.y += amount;
        }
        self.distance += amount;
        self.score = (self.distance / SCORE_UNIT).floor() as u32;
        self.trim_platforms();
        self.trim_hazards();
        self.spawn_platforms_if_needed();
    }

    /// Drop platforms that collapsed away or scrolled below the view.
    /// A removed supporting platform forces the player airborne in the same
    /// pass so the ground handle is never stale across a frame.
    fn trim_platforms(&mut self) {
        let cull_y = self.arena.platform_cull_y();
        self.platforms.retain(|p| !p.destroyed && p.pos.y < cull_y);
        if let Some(player) = self.player.as_mut()
            && let Some(id) = player.ground_platform
            && !self.platforms.iter().any(|p| p.id == id)
        {
            player.ground_platform = None;
            player.on_ground = false;
            player.clear_surface_effects();
        }
    }

    fn trim_hazards(&mut self) {
        let cannon_cull = self.arena.cannon_cull_y();
        self.cannons.retain(|c| c.y < cannon_cull);
        let projectile_cull = self.arena.projectile_cull_y();
        let width = self.arena.width;
        self.projectiles
            .retain(|p| p.active && !p.is_out_of_bounds(width) && p.pos.y < projectile_cull);
    }

    fn spawn_initial_platforms(&mut self) {
        let base_y = self.arena.height * 0.7;
        let base_width = 120.0;
        let base_x = (self.arena.width - base_width) / 2.0;
        let id = self.alloc_platform_id();
        self.platforms
            .push(Platform::new(id, base_x, base_y, base_width, PlatformKind::Basic));

        let mut current_y = base_y - 90.0;
        for i in 0..6 {
            let offset = if i % 2 == 0 { 60.0 } else { -60.0 };
            let platform = self.generate_platform(current_y, offset, i > 1);
            let cannon_y = platform.top() - 40.0;
            self.platforms.push(platform);
            self.try_spawn_cannon(cannon_y);
            current_y -= 80.0 + self.rng.random::<f32>() * 60.0;
        }
    }

    /// Top the column up: while the highest platform is below the spawn
    /// horizon, stack new ones above it. Each pass raises the top by at
    /// least 70 units, which keeps the loop finite.
    fn spawn_platforms_if_needed(&mut self) {
        let Some(mut highest_y) = self.platforms.iter().map(|p| p.pos.y).reduce(f32::min) else {
            return;
        };
        while highest_y > self.arena.spawn_horizon_y() {
            let gap = 70.0 + self.rng.random::<f32>() * 80.0;
            let platform = self.generate_platform(highest_y - gap, 0.0, true);
            highest_y = platform.top();
            let cannon_y = highest_y - 40.0;
            self.platforms.push(platform);
            self.try_spawn_cannon(cannon_y);
        }
    }

    /// Synthesize one platform at the given height. `offset` nudges the
    /// random x (used by the initial stair), `allow_special` gates the
    /// non-basic variants.
    fn generate_platform(&mut self, y: f32, offset: f32, allow_special: bool) -> Platform {
        let width = PLATFORM_MIN_WIDTH + self.rng.random::<f32>() * PLATFORM_WIDTH_RANGE;
        let min_x = self.arena.min_x() + PLATFORM_INNER_MARGIN;
        let max_x = self.arena.max_x(width) - PLATFORM_INNER_MARGIN;
        let mut x = min_x + self.rng.random::<f32>() * (max_x - min_x).max(1.0);
        if offset != 0.0 {
            x = (x + offset).clamp(min_x, max_x);
        }
        // Occasionally force placement flush against a wall
        let placement_roll = self.rng.random::<f32>();
        if placement_roll < 0.25 {
            x = min_x;
        } else if placement_roll > 0.75 {
            x = max_x;
        }
        let kind = if allow_special {
            let type_roll = self.rng.random::<f32>();
            if type_roll < 0.18 {
                PlatformKind::fragile()
            } else if type_roll < 0.33 {
                PlatformKind::Sticky
            } else if type_roll < 0.45 {
                PlatformKind::Smoke {
                    cloud_phase: self.rng.random::<f32>() * std::f32::consts::TAU,
                }
            } else {
                PlatformKind::Basic
            }
        } else {
            PlatformKind::Basic
        };
        let id = self.alloc_platform_id();
        Platform::new(id, x, y, width, kind)
    }

    /// A cannon-spawn opportunity at the given height; only taken once the
    /// climb has crossed the running distance threshold
    fn try_spawn_cannon(&mut self, y: f32) {
        if self.distance < self.next_cannon_distance {
            return;
        }
        if self.rng.random::<f32>() < CANNON_CHANCE {
            let side = if self.rng.random::<f32>() < 0.5 {
                Side::Left
            } else {
                Side::Right
            };
            let cannon_y = y.max(-40.0);
            let cannon = Cannon::new(side, cannon_y, &self.arena, &mut self.rng);
            log::debug!("Cannon spawned on {:?} wall at y={:.0}", cannon.side, cannon_y);
            self.cannons.push(cannon);
            let spacing_multiplier = 0.9 + self.rng.random::<f32>() * 0.7;
            self.next_cannon_distance = self.distance + CANNON_SPACING * spacing_multiplier;
        }
    }

    /// Ease the displayed score toward the real one; the rate grows with the
    /// remaining gap so big jumps still settle quickly
    fn update_display_score(&mut self, dt: f32) {
        let diff = self.score as f32 - self.display_score;
        if diff.abs() < 0.01 {
            self.display_score = self.score as f32;
            return;
        }
        let rate = 35.0 + diff.abs() * 0.2;
        let step = diff.signum() * diff.abs().min(rate * dt);
        self.display_score += step;
    }

    /// One-shot transition into the terminal state
    fn finish_run(&mut self) {
        self.phase = Phase::Over;
        self.pending_shift = 0.0;
        self.display_score = self.score as f32;
        if self.score > self.best_score {
            self.best_score = self.score;
            self.store.save_best(self.best_score);
            log::info!("Game over: score {} (new best)", self.score);
        } else {
            log::info!("Game over: score {} (best {})", self.score, self.best_score);
        }
    }
}
